//! Frame and timer scheduling on a pluggable clock.
//!
//! The scheduler never runs callbacks itself. It records pending frame
//! requests and timer deadlines under [`TaskId`]s, and hands back the ids
//! that are due when the host reaches a frame boundary. The engine decides
//! what each id means.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Manually advanced clock for tests and trace replay.
///
/// Clones share the same underlying time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `at`. Earlier values are ignored; time never goes backwards.
    pub fn set(&self, at: Duration) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Opaque handle for one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw id, for logging.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// What a scheduled task is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Runs at the next frame boundary.
    Frame,
    /// Runs at the first frame boundary at or after its deadline.
    Timer {
        /// Deadline on the scheduler's clock.
        deadline: Duration,
    },
}

/// Pending frame requests and timers.
pub struct Scheduler {
    clock: Rc<dyn Clock>,
    next_id: u64,
    frames: Vec<TaskId>,
    timers: Vec<(Duration, TaskId)>,
}

impl Scheduler {
    /// Create an empty scheduler on `clock`.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            next_id: 0,
            frames: Vec::new(),
            timers: Vec::new(),
        }
    }

    /// Current time on the scheduler's clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Request a callback at the next frame boundary.
    pub fn request_frame(&mut self) -> (TaskId, TaskKind) {
        let id = self.allocate();
        self.frames.push(id);
        (id, TaskKind::Frame)
    }

    /// Request a callback once `delay` has elapsed.
    pub fn set_timeout(&mut self, delay: Duration) -> (TaskId, TaskKind) {
        let id = self.allocate();
        let deadline = self.now() + delay;
        self.timers.push((deadline, id));
        (id, TaskKind::Timer { deadline })
    }

    /// Cancel a pending task. Returns false if it was not pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.frames.iter().position(|&f| f == id) {
            self.frames.remove(pos);
            return true;
        }
        if let Some(pos) = self.timers.iter().position(|&(_, t)| t == id) {
            self.timers.remove(pos);
            return true;
        }
        false
    }

    /// Remove and return every task due at a frame boundary at `now()`.
    ///
    /// Frame requests come first in request order, then expired timers in
    /// deadline order. Tasks requested while the caller processes the
    /// returned ids wait for the next boundary.
    pub fn take_due(&mut self) -> Vec<TaskId> {
        let now = self.now();
        let mut due: Vec<TaskId> = std::mem::take(&mut self.frames);

        let mut expired: Vec<(Duration, TaskId)> = Vec::new();
        self.timers.retain(|&(deadline, id)| {
            if deadline <= now {
                expired.push((deadline, id));
                false
            } else {
                true
            }
        });
        expired.sort();
        due.extend(expired.into_iter().map(|(_, id)| id));
        due
    }

    /// Number of pending frame requests and timers.
    pub fn pending(&self) -> usize {
        self.frames.len() + self.timers.len()
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|&(deadline, _)| deadline).min()
    }

    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now())
            .field("frames", &self.frames)
            .field("timers", &self.timers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> (ManualClock, Scheduler) {
        let clock = ManualClock::new();
        let scheduler = Scheduler::new(Rc::new(clock.clone()));
        (clock, scheduler)
    }

    #[test]
    fn manual_clock_never_goes_backwards() {
        let clock = ManualClock::new();
        clock.set(Duration::from_millis(50));
        clock.set(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(50));
        clock.advance(Duration::from_millis(5));
        assert_eq!(clock.now(), Duration::from_millis(55));
    }

    #[test]
    fn frame_is_due_at_next_boundary() {
        let (_clock, mut scheduler) = scheduler();
        let (frame, kind) = scheduler.request_frame();
        assert_eq!(kind, TaskKind::Frame);
        assert_eq!(scheduler.take_due(), vec![frame]);
        assert!(scheduler.take_due().is_empty());
    }

    #[test]
    fn timer_waits_for_deadline() {
        let (clock, mut scheduler) = scheduler();
        let (timer, kind) = scheduler.set_timeout(Duration::from_millis(100));
        assert_eq!(
            kind,
            TaskKind::Timer {
                deadline: Duration::from_millis(100)
            }
        );

        clock.set(Duration::from_millis(99));
        assert!(scheduler.take_due().is_empty());

        clock.set(Duration::from_millis(100));
        assert_eq!(scheduler.take_due(), vec![timer]);
    }

    #[test]
    fn frames_precede_timers_and_timers_run_in_deadline_order() {
        let (clock, mut scheduler) = scheduler();
        let (late, _) = scheduler.set_timeout(Duration::from_millis(30));
        let (early, _) = scheduler.set_timeout(Duration::from_millis(10));
        clock.set(Duration::from_millis(40));
        let (frame, _) = scheduler.request_frame();

        assert_eq!(scheduler.take_due(), vec![frame, early, late]);
    }

    #[test]
    fn cancelled_tasks_never_come_due() {
        let (clock, mut scheduler) = scheduler();
        let (frame, _) = scheduler.request_frame();
        let (timer, _) = scheduler.set_timeout(Duration::from_millis(5));

        assert!(scheduler.cancel(frame));
        assert!(scheduler.cancel(timer));
        assert!(!scheduler.cancel(timer));
        assert_eq!(scheduler.pending(), 0);

        clock.advance(Duration::from_millis(10));
        assert!(scheduler.take_due().is_empty());
    }

    #[test]
    fn next_deadline_reports_earliest_timer() {
        let (_clock, mut scheduler) = scheduler();
        assert_eq!(scheduler.next_deadline(), None);
        scheduler.set_timeout(Duration::from_millis(30));
        scheduler.set_timeout(Duration::from_millis(20));
        assert_eq!(scheduler.next_deadline(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn task_ids_are_unique() {
        let (_clock, mut scheduler) = scheduler();
        let (a, _) = scheduler.request_frame();
        let (b, _) = scheduler.request_frame();
        let (c, _) = scheduler.set_timeout(Duration::ZERO);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }
}
