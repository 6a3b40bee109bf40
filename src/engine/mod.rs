//! Virtualization engine - the public surface renderers talk to.
//!
//! An [`Engine`] owns one list's position index, viewport state and all
//! scheduled work. Hosts feed it raw scroll and resize values, call
//! [`Engine::tick`] once per animation frame, and render whatever range
//! the visible-range listeners report.
//!
//! # Module Structure
//!
//! - `scheduler`: Clock trait, ManualClock/SystemClock, frame + timer queue
//! - `lifecycle`: HandleRegistry and disposal discipline
//! - `coordinator`: Idle/Scrolling/Settling state machine
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use vlist::config::EngineConfig;
//! use vlist::engine::{Engine, ManualClock};
//! use vlist::model::HeightSource;
//!
//! let clock = ManualClock::new();
//! let mut engine = Engine::with_clock(
//!     1000,
//!     HeightSource::Uniform(50.0),
//!     EngineConfig::default(),
//!     Rc::new(clock.clone()),
//! );
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! engine.on_visible_range_change(move |range| sink.borrow_mut().push(range.bounds()));
//!
//! engine.notify_resize(500.0);
//! engine.notify_scroll(2000.0);
//! engine.tick();
//!
//! assert_eq!(seen.borrow().last(), Some(&Some((37, 53))));
//! ```

pub mod coordinator;
pub mod lifecycle;
pub mod scheduler;

pub use coordinator::{CoordinatorEvent, ScrollPhase};
pub use scheduler::{Clock, ManualClock, SystemClock, TaskId};

use std::rc::Rc;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::model::types::{sanitize_extent, sanitize_scroll_offset};
use crate::model::{Diagnostic, HeightSource, NavCommand, Viewport};
use crate::view_state::navigation;
use crate::view_state::{PositionIndex, VisibleRange};

use coordinator::Coordinator;
use lifecycle::Lifecycle;
use scheduler::Scheduler;

/// Identifies a registered listener for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = (ListenerId, Box<dyn FnMut(&T)>);

/// Windowing engine for one virtualized list.
///
/// Single-threaded: every method runs to completion and callbacks are
/// invoked synchronously from the method that produced them.
///
/// # Disposal
/// After [`Engine::dispose`] (or drop) no scheduled callback runs and no
/// range or activity listener is invoked again. Further calls are no-ops
/// reported as [`Diagnostic::DisposedHandleUse`].
pub struct Engine {
    lifecycle: Lifecycle,
    coordinator: Coordinator,
    config: EngineConfig,
    next_listener: u64,
    range_listeners: Vec<Listener<VisibleRange>>,
    activity_listeners: Vec<Listener<bool>>,
    diagnostic_listeners: Vec<Listener<Diagnostic>>,
}

impl Engine {
    /// Create an engine on the wall clock.
    pub fn create(item_count: usize, heights: HeightSource, config: EngineConfig) -> Self {
        Self::with_clock(item_count, heights, config, Rc::new(SystemClock::new()))
    }

    /// Create an engine on an explicit clock.
    ///
    /// Diagnostics raised while building the initial index are logged; no
    /// listener can be registered yet to receive them.
    pub fn with_clock(
        item_count: usize,
        heights: HeightSource,
        config: EngineConfig,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let (config, config_diag) = EngineConfig::new(config.overscan_count, config.settle_delay);
        let (index, build_diags) = PositionIndex::build(item_count, &heights);
        for diagnostic in config_diag.iter().chain(&build_diags) {
            diagnostic.log();
        }

        tracing::debug!(
            item_count,
            overscan = config.overscan_count,
            settle_delay_ms = config.settle_delay.as_millis() as u64,
            "Created engine"
        );

        Self {
            lifecycle: Lifecycle::new(Scheduler::new(clock)),
            coordinator: Coordinator::new(
                Rc::new(index),
                config.overscan_count,
                config.settle_delay,
            ),
            config,
            next_listener: 0,
            range_listeners: Vec::new(),
            activity_listeners: Vec::new(),
            diagnostic_listeners: Vec::new(),
        }
    }

    /// Called whenever the resolved `{start, end}` indices change.
    ///
    /// Once disposed the callback is dropped unregistered and the returned
    /// id matches no listener.
    pub fn on_visible_range_change(
        &mut self,
        callback: impl FnMut(&VisibleRange) + 'static,
    ) -> ListenerId {
        let id = self.allocate_listener();
        if !self.reject_disposed("on_visible_range_change") {
            self.range_listeners.push((id, Box::new(callback)));
        }
        id
    }

    /// Called when scroll activity starts (`true`) or settles (`false`).
    ///
    /// Once disposed the callback is dropped unregistered.
    pub fn on_scroll_activity_change(
        &mut self,
        callback: impl FnMut(&bool) + 'static,
    ) -> ListenerId {
        let id = self.allocate_listener();
        if !self.reject_disposed("on_scroll_activity_change") {
            self.activity_listeners.push((id, Box::new(callback)));
        }
        id
    }

    /// Called for every diagnostic the engine absorbs.
    ///
    /// Still accepted after disposal, so disposed-handle use stays observable.
    pub fn on_diagnostic(&mut self, callback: impl FnMut(&Diagnostic) + 'static) -> ListenerId {
        let id = self.allocate_listener();
        self.diagnostic_listeners.push((id, Box::new(callback)));
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.range_listeners.len()
            + self.activity_listeners.len()
            + self.diagnostic_listeners.len();
        self.range_listeners.retain(|(lid, _)| *lid != id);
        self.activity_listeners.retain(|(lid, _)| *lid != id);
        self.diagnostic_listeners.retain(|(lid, _)| *lid != id);
        let after = self.range_listeners.len()
            + self.activity_listeners.len()
            + self.diagnostic_listeners.len();
        before != after
    }

    /// Ingest a scroll notification. The range updates on the next [`Engine::tick`].
    pub fn notify_scroll(&mut self, scroll_offset: f64) {
        if self.reject_disposed("notify_scroll") {
            return;
        }
        let (scroll_offset, diagnostic) = sanitize_scroll_offset(scroll_offset);
        let mut events: Vec<CoordinatorEvent> =
            diagnostic.map(CoordinatorEvent::Diagnostic).into_iter().collect();
        self.coordinator
            .on_scroll(scroll_offset, &mut self.lifecycle, &mut events);
        self.dispatch(events);
    }

    /// Ingest a viewport extent change. Recomputes immediately.
    pub fn notify_resize(&mut self, extent: f64) {
        if self.reject_disposed("notify_resize") {
            return;
        }
        let (extent, diagnostic) = sanitize_extent(extent);
        let mut events: Vec<CoordinatorEvent> =
            diagnostic.map(CoordinatorEvent::Diagnostic).into_iter().collect();
        self.coordinator
            .on_resize(extent, &mut self.lifecycle, &mut events);
        self.dispatch(events);
    }

    /// Target scroll offset for a navigation command.
    ///
    /// The engine does not move; the renderer scrolls to the returned offset
    /// and reports it back through [`Engine::notify_scroll`]. Translation
    /// starts from the last notified offset, even before a frame applies it.
    pub fn navigate(&mut self, command: NavCommand) -> f64 {
        let viewport = self.coordinator.latest_viewport();
        let current = viewport.scroll_offset;
        if self.reject_disposed("navigate") {
            return current;
        }
        let (target, diagnostic) =
            navigation::translate(self.coordinator.index(), &viewport, command);
        tracing::debug!(?command, from = current, to = target, "Navigate");
        self.dispatch(diagnostic.map(CoordinatorEvent::Diagnostic).into_iter().collect());
        target
    }

    /// Rebuild the position index and recompute immediately.
    pub fn update_items(&mut self, item_count: usize, heights: HeightSource) {
        if self.reject_disposed("update_items") {
            return;
        }
        let (index, diagnostics) = PositionIndex::build(item_count, &heights);
        let mut events: Vec<CoordinatorEvent> = diagnostics
            .into_iter()
            .map(CoordinatorEvent::Diagnostic)
            .collect();
        self.coordinator
            .on_items(Rc::new(index), &mut self.lifecycle, &mut events);
        self.dispatch(events);
    }

    /// Frame boundary: run the pending recompute and any expired settle timer.
    ///
    /// Silently does nothing once disposed, so host frame loops may keep
    /// ticking through teardown.
    pub fn tick(&mut self) {
        let due = self.lifecycle.take_due();
        let mut events = Vec::new();
        for id in due {
            if !self.lifecycle.admit(id) {
                continue;
            }
            self.coordinator.run_task(id, &mut events);
        }
        self.dispatch(events);
    }

    /// Report a diagnostic raised by the host at the engine boundary.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.dispatch(vec![CoordinatorEvent::Diagnostic(diagnostic)]);
    }

    /// Cancel all scheduled work and detach range/activity listeners. Idempotent.
    pub fn dispose(&mut self) {
        if self.lifecycle.is_disposed() {
            return;
        }
        let cancelled = self.lifecycle.dispose();
        self.coordinator.reset();
        self.range_listeners.clear();
        self.activity_listeners.clear();
        tracing::debug!(cancelled, "Disposed engine");
    }

    /// Last resolved range.
    pub fn visible_range(&self) -> VisibleRange {
        self.coordinator.range()
    }

    /// Last applied viewport.
    pub fn viewport(&self) -> Viewport {
        self.coordinator.viewport()
    }

    /// Current scroll phase.
    pub fn phase(&self) -> ScrollPhase {
        self.coordinator.phase()
    }

    /// Scroll Activity State.
    pub fn is_scrolling(&self) -> bool {
        self.coordinator.phase().is_active()
    }

    /// Current position index. Rebuilt (not mutated) by [`Engine::update_items`],
    /// so re-fetch after every update.
    pub fn position_index(&self) -> Rc<PositionIndex> {
        Rc::clone(self.coordinator.index())
    }

    /// Effective configuration.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Scheduled handles not yet fired or cancelled.
    pub fn outstanding_handles(&self) -> usize {
        self.lifecycle.outstanding()
    }

    /// Earliest settle deadline, for hosts that sleep between frames.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.lifecycle.next_deadline()
    }

    /// Whether [`Engine::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.lifecycle.is_disposed()
    }

    fn reject_disposed(&mut self, operation: &'static str) -> bool {
        if !self.lifecycle.is_disposed() {
            return false;
        }
        self.report(Diagnostic::DisposedHandleUse { operation });
        true
    }

    fn allocate_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        ListenerId(self.next_listener)
    }

    fn dispatch(&mut self, events: Vec<CoordinatorEvent>) {
        for event in events {
            match event {
                CoordinatorEvent::RangeChanged(range) => {
                    for (_, listener) in &mut self.range_listeners {
                        listener(&range);
                    }
                }
                CoordinatorEvent::ActivityChanged(active) => {
                    for (_, listener) in &mut self.activity_listeners {
                        listener(&active);
                    }
                }
                CoordinatorEvent::Diagnostic(diagnostic) => {
                    diagnostic.log();
                    for (_, listener) in &mut self.diagnostic_listeners {
                        listener(&diagnostic);
                    }
                }
            }
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("coordinator", &self.coordinator)
            .field("lifecycle", &self.lifecycle)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
