//! Ownership of scheduled work.
//!
//! Every frame request and settle timer goes through [`Lifecycle`], which
//! records the handle in a registry until it fires or is cancelled. After
//! [`Lifecycle::dispose`] nothing new can be scheduled, every outstanding
//! handle has been cancelled, and [`Lifecycle::admit`] rejects any id that
//! was already on its way to the engine.

use std::collections::BTreeMap;
use std::time::Duration;

use super::scheduler::{Scheduler, TaskId, TaskKind};

/// Outstanding scheduled handles, keyed by id.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    outstanding: BTreeMap<TaskId, TaskKind>,
}

impl HandleRegistry {
    /// Track a newly acquired handle.
    pub fn acquire(&mut self, id: TaskId, kind: TaskKind) {
        self.outstanding.insert(id, kind);
    }

    /// Stop tracking a handle. Returns false if it was not outstanding.
    pub fn release(&mut self, id: TaskId) -> bool {
        self.outstanding.remove(&id).is_some()
    }

    /// Check whether a handle is still outstanding.
    pub fn contains(&self, id: TaskId) -> bool {
        self.outstanding.contains_key(&id)
    }

    /// Number of outstanding handles.
    pub fn len(&self) -> usize {
        self.outstanding.len()
    }

    /// Returns true if no handles are outstanding.
    pub fn is_empty(&self) -> bool {
        self.outstanding.is_empty()
    }

    /// Remove and return every outstanding handle.
    pub fn drain(&mut self) -> Vec<TaskId> {
        std::mem::take(&mut self.outstanding).into_keys().collect()
    }
}

/// Scheduler plus handle registry plus disposed flag.
#[derive(Debug)]
pub struct Lifecycle {
    scheduler: Scheduler,
    registry: HandleRegistry,
    disposed: bool,
}

impl Lifecycle {
    /// Wrap a scheduler.
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            registry: HandleRegistry::default(),
            disposed: false,
        }
    }

    /// Current time on the scheduler's clock.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Request a frame callback. `None` once disposed.
    pub fn request_frame(&mut self) -> Option<TaskId> {
        if self.disposed {
            return None;
        }
        let (id, kind) = self.scheduler.request_frame();
        self.registry.acquire(id, kind);
        Some(id)
    }

    /// Start a timer. `None` once disposed.
    pub fn set_timeout(&mut self, delay: Duration) -> Option<TaskId> {
        if self.disposed {
            return None;
        }
        let (id, kind) = self.scheduler.set_timeout(delay);
        self.registry.acquire(id, kind);
        Some(id)
    }

    /// Cancel and release a handle.
    pub fn cancel(&mut self, id: TaskId) {
        self.scheduler.cancel(id);
        self.registry.release(id);
    }

    /// Take the ids due at this frame boundary, releasing them from the registry.
    ///
    /// Returns nothing once disposed.
    pub fn take_due(&mut self) -> Vec<TaskId> {
        if self.disposed {
            return Vec::new();
        }
        let due = self.scheduler.take_due();
        for &id in &due {
            self.registry.release(id);
        }
        due
    }

    /// Gate every callback: false once disposed.
    pub fn admit(&self, id: TaskId) -> bool {
        if self.disposed {
            tracing::trace!(task = id.get(), "Dropping callback after dispose");
            return false;
        }
        true
    }

    /// Cancel every outstanding handle and refuse further scheduling.
    ///
    /// Idempotent. Returns the number of handles cancelled by this call.
    pub fn dispose(&mut self) -> usize {
        self.disposed = true;
        let handles = self.registry.drain();
        for &id in &handles {
            self.scheduler.cancel(id);
        }
        handles.len()
    }

    /// Whether [`Lifecycle::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of handles acquired but not yet fired or cancelled.
    pub fn outstanding(&self) -> usize {
        self.registry.len()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }
}
