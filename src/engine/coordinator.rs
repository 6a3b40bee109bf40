//! Scroll/resize coordination state machine.
//!
//! ```text
//!            scroll                frame fires             settle timer fires
//!   Idle ───────────────▶ Scrolling ───────────▶ Settling ───────────────────▶ Idle
//!                            ▲                       │
//!                            └────── scroll ─────────┘
//! ```
//!
//! Scroll notifications only record the latest offset; the visible range is
//! recomputed once per frame. Each notification restarts the settle timer.
//! Resizes and item updates recompute immediately and fold in any pending
//! scroll offset, cancelling the frame request that would have applied it.

use std::rc::Rc;
use std::time::Duration;

use crate::model::{Diagnostic, Viewport};
use crate::view_state::{resolve, PositionIndex, VisibleRange};

use super::lifecycle::Lifecycle;
use super::scheduler::TaskId;

/// Scroll activity phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    /// No scroll activity; no timer pending.
    #[default]
    Idle,
    /// A coalesced recompute is waiting for the next frame.
    Scrolling,
    /// Range is current; waiting for the quiet period to elapse.
    Settling,
}

impl ScrollPhase {
    /// Whether consumers should treat the list as actively scrolling.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Observable outcome of a coordinator step.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorEvent {
    /// Resolved range changed.
    RangeChanged(VisibleRange),
    /// Scroll activity flipped.
    ActivityChanged(bool),
    /// Recoverable condition absorbed during the step.
    Diagnostic(Diagnostic),
}

/// Owns viewport state and the single pending frame / settle timer handles.
#[derive(Debug)]
pub struct Coordinator {
    index: Rc<PositionIndex>,
    viewport: Viewport,
    pending_scroll: Option<f64>,
    phase: ScrollPhase,
    pending_frame: Option<TaskId>,
    settle_timer: Option<TaskId>,
    range: VisibleRange,
    overscan: usize,
    settle_delay: Duration,
}

impl Coordinator {
    /// Create a coordinator for `index` with an empty viewport at offset 0.
    pub fn new(index: Rc<PositionIndex>, overscan: usize, settle_delay: Duration) -> Self {
        let viewport = Viewport::default();
        let range = resolve(&index, &viewport, overscan);
        Self {
            index,
            viewport,
            pending_scroll: None,
            phase: ScrollPhase::Idle,
            pending_frame: None,
            settle_timer: None,
            range,
            overscan,
            settle_delay,
        }
    }

    /// Record a scroll notification.
    ///
    /// Overwrites any pending offset, requests a frame if none is pending and
    /// restarts the settle timer.
    pub fn on_scroll(
        &mut self,
        scroll_offset: f64,
        lifecycle: &mut Lifecycle,
        events: &mut Vec<CoordinatorEvent>,
    ) {
        self.pending_scroll = Some(scroll_offset);

        if self.pending_frame.is_none() {
            self.pending_frame = lifecycle.request_frame();
        } else {
            tracing::trace!(scroll_offset, "Coalesced scroll into pending frame");
        }

        if let Some(timer) = self.settle_timer.take() {
            lifecycle.cancel(timer);
        }
        self.settle_timer = lifecycle.set_timeout(self.settle_delay);

        if !self.phase.is_active() {
            events.push(CoordinatorEvent::ActivityChanged(true));
        }
        self.phase = ScrollPhase::Scrolling;
    }

    /// Apply a viewport extent change immediately.
    ///
    /// Unchanged extents are ignored.
    pub fn on_resize(
        &mut self,
        extent: f64,
        lifecycle: &mut Lifecycle,
        events: &mut Vec<CoordinatorEvent>,
    ) {
        if extent == self.viewport.extent {
            return;
        }
        tracing::debug!(from = self.viewport.extent, to = extent, "Viewport resized");
        self.viewport.extent = extent;
        self.flush_pending_scroll(lifecycle);
        self.recompute(false, events);
    }

    /// Swap in a rebuilt position index and recompute immediately.
    ///
    /// A range whose indices are unchanged is still reported when its offsets
    /// moved, since renderers position content from them.
    pub fn on_items(
        &mut self,
        index: Rc<PositionIndex>,
        lifecycle: &mut Lifecycle,
        events: &mut Vec<CoordinatorEvent>,
    ) {
        self.index = index;
        self.flush_pending_scroll(lifecycle);
        self.recompute(true, events);
    }

    /// Run a scheduled task previously requested by this coordinator.
    ///
    /// Ids that are neither the pending frame nor the settle timer are stale
    /// and ignored.
    pub fn run_task(&mut self, id: TaskId, events: &mut Vec<CoordinatorEvent>) {
        if self.pending_frame == Some(id) {
            self.pending_frame = None;
            if let Some(offset) = self.pending_scroll.take() {
                self.viewport.scroll_offset = offset;
            }
            self.recompute(false, events);
            if self.phase == ScrollPhase::Scrolling {
                self.phase = ScrollPhase::Settling;
            }
        } else if self.settle_timer == Some(id) {
            self.settle_timer = None;
            if self.pending_frame.is_none() && self.phase.is_active() {
                self.phase = ScrollPhase::Idle;
                events.push(CoordinatorEvent::ActivityChanged(false));
            }
        } else {
            tracing::trace!(task = id.get(), "Ignoring stale task");
        }
    }

    /// Forget pending work. The lifecycle cancels the handles themselves.
    pub fn reset(&mut self) {
        self.pending_frame = None;
        self.settle_timer = None;
        self.pending_scroll = None;
        self.phase = ScrollPhase::Idle;
    }

    /// Current position index. Re-fetch after every item update.
    pub fn index(&self) -> &Rc<PositionIndex> {
        &self.index
    }

    /// Last applied viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last resolved range.
    pub fn range(&self) -> VisibleRange {
        self.range
    }

    /// Last applied viewport with any pending scroll offset folded in.
    pub fn latest_viewport(&self) -> Viewport {
        Viewport {
            scroll_offset: self.pending_scroll.unwrap_or(self.viewport.scroll_offset),
            ..self.viewport
        }
    }

    /// Current scroll phase.
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Overscan used for every resolve.
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Fold a pending scroll offset into the viewport and drop its frame request.
    fn flush_pending_scroll(&mut self, lifecycle: &mut Lifecycle) {
        if let Some(offset) = self.pending_scroll.take() {
            self.viewport.scroll_offset = offset;
        }
        if let Some(frame) = self.pending_frame.take() {
            lifecycle.cancel(frame);
            if self.phase == ScrollPhase::Scrolling {
                self.phase = ScrollPhase::Settling;
            }
        }
    }

    fn recompute(&mut self, report_moved_offsets: bool, events: &mut Vec<CoordinatorEvent>) {
        let next = resolve(&self.index, &self.viewport, self.overscan);
        let changed = if report_moved_offsets {
            next != self.range
        } else {
            !next.same_indices(&self.range)
        };

        tracing::debug!(
            scroll_offset = self.viewport.scroll_offset,
            extent = self.viewport.extent,
            range = ?next.bounds(),
            changed,
            "Recomputed visible range"
        );

        self.range = next;
        if changed {
            events.push(CoordinatorEvent::RangeChanged(next));
        }
    }
}
