//! Tests for the engine surface: coalescing, settle, resize, disposal.

use super::*;
use std::cell::RefCell;
use std::time::Duration;

/// Engine on a manual clock with every listener recorded.
struct Recorder {
    clock: ManualClock,
    engine: Engine,
    ranges: Rc<RefCell<Vec<VisibleRange>>>,
    activity: Rc<RefCell<Vec<bool>>>,
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl Recorder {
    fn new(count: usize, heights: HeightSource, overscan: usize) -> Self {
        let clock = ManualClock::new();
        let config = EngineConfig {
            overscan_count: overscan,
            settle_delay: Duration::from_millis(100),
        };
        let mut engine = Engine::with_clock(count, heights, config, Rc::new(clock.clone()));

        let ranges = Rc::new(RefCell::new(Vec::new()));
        let activity = Rc::new(RefCell::new(Vec::new()));
        let diagnostics = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&ranges);
        engine.on_visible_range_change(move |r| sink.borrow_mut().push(*r));
        let sink = Rc::clone(&activity);
        engine.on_scroll_activity_change(move |a| sink.borrow_mut().push(*a));
        let sink = Rc::clone(&diagnostics);
        engine.on_diagnostic(move |d| sink.borrow_mut().push(d.clone()));

        Self {
            clock,
            engine,
            ranges,
            activity,
            diagnostics,
        }
    }

    fn uniform(count: usize, height: f64, overscan: usize) -> Self {
        Self::new(count, HeightSource::Uniform(height), overscan)
    }

    fn frame(&mut self) {
        self.clock.advance(Duration::from_millis(16));
        self.engine.tick();
    }

    fn take_ranges(&self) -> Vec<VisibleRange> {
        std::mem::take(&mut *self.ranges.borrow_mut())
    }
}

mod coalescing {
    use super::*;

    #[test]
    fn burst_within_one_frame_yields_one_callback_with_last_offset() {
        let mut r = Recorder::uniform(1000, 50.0, 2);
        r.engine.notify_resize(500.0);
        r.take_ranges();

        for i in 1..=50 {
            r.engine.notify_scroll(i as f64 * 40.0);
        }
        assert!(r.take_ranges().is_empty(), "nothing before the frame");

        r.frame();
        let ranges = r.take_ranges();
        assert_eq!(ranges.len(), 1);
        assert_eq!(r.engine.viewport().scroll_offset, 2000.0);
        assert_eq!(ranges[0].bounds(), Some((38, 52)));
    }

    #[test]
    fn scroll_without_index_change_does_not_notify() {
        let mut r = Recorder::uniform(1000, 50.0, 2);
        r.engine.notify_resize(500.0);
        r.take_ranges();

        r.engine.notify_scroll(10.0);
        r.frame();
        assert!(r.take_ranges().is_empty());
    }

    #[test]
    fn separate_frames_each_recompute() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        r.engine.notify_resize(500.0);
        r.take_ranges();

        r.engine.notify_scroll(1000.0);
        r.frame();
        r.engine.notify_scroll(3000.0);
        r.frame();

        let bounds: Vec<_> = r.take_ranges().iter().map(|x| x.bounds()).collect();
        assert_eq!(bounds, vec![Some((20, 30)), Some((60, 70))]);
    }
}

mod activity {
    use super::*;

    #[test]
    fn activity_rises_on_scroll_and_falls_after_quiet_period() {
        let mut r = Recorder::uniform(100, 10.0, 0);
        r.engine.notify_scroll(50.0);
        assert!(r.engine.is_scrolling());
        assert_eq!(*r.activity.borrow(), vec![true]);

        r.frame();
        assert_eq!(r.engine.phase(), ScrollPhase::Settling);
        assert!(r.engine.is_scrolling());

        r.clock.advance(Duration::from_millis(100));
        r.engine.tick();
        assert!(!r.engine.is_scrolling());
        assert_eq!(*r.activity.borrow(), vec![true, false]);
        assert_eq!(r.engine.outstanding_handles(), 0);
    }

    #[test]
    fn continuous_scrolling_reports_activity_once() {
        let mut r = Recorder::uniform(100, 10.0, 0);
        for i in 0..20 {
            r.engine.notify_scroll(i as f64 * 5.0);
            r.frame();
        }
        assert_eq!(*r.activity.borrow(), vec![true]);
        // Timer restarted by the last notification, one frame ago.
        let last_scroll = r.clock.now() - Duration::from_millis(16);
        assert_eq!(
            r.engine.next_deadline(),
            Some(last_scroll + Duration::from_millis(100))
        );
    }
}

mod resize {
    use super::*;

    #[test]
    fn resize_recomputes_without_waiting_for_frame() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        r.engine.notify_resize(500.0);
        assert_eq!(r.take_ranges().last().and_then(|x| x.bounds()), Some((0, 10)));
        assert_eq!(r.engine.outstanding_handles(), 0);
    }

    #[test]
    fn resize_supersedes_pending_scroll_for_the_same_frame() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        r.engine.notify_resize(500.0);
        r.take_ranges();

        r.engine.notify_scroll(2000.0);
        r.engine.notify_resize(250.0);

        // Resize ran first and already used the pending offset.
        let ranges = r.take_ranges();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].bounds(), Some((40, 45)));

        r.frame();
        assert!(r.take_ranges().is_empty());
    }

    #[test]
    fn negative_extent_is_clamped_and_reported() {
        let mut r = Recorder::uniform(10, 10.0, 0);
        r.engine.notify_resize(-1.0);
        assert_eq!(r.engine.viewport().extent, 0.0);
        assert!(matches!(
            r.diagnostics.borrow()[0],
            Diagnostic::InvalidViewportExtent { .. }
        ));
    }
}

mod items {
    use super::*;

    #[test]
    fn update_items_rebuilds_and_recomputes_immediately() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        r.engine.notify_resize(500.0);
        let before = r.engine.position_index();
        r.take_ranges();

        r.engine.update_items(1000, HeightSource::Uniform(100.0));
        let after = r.engine.position_index();

        assert!(!Rc::ptr_eq(&before, &after), "index is rebuilt, not mutated");
        assert_eq!(before.total_extent(), 50_000.0);
        assert_eq!(after.total_extent(), 100_000.0);
        assert_eq!(r.take_ranges()[0].bounds(), Some((0, 5)));
    }

    #[test]
    fn update_to_zero_items_resolves_empty() {
        let mut r = Recorder::uniform(10, 50.0, 0);
        r.engine.notify_resize(100.0);
        r.engine.update_items(0, HeightSource::Uniform(50.0));
        assert_eq!(r.engine.visible_range(), VisibleRange::Empty);
        assert_eq!(r.engine.navigate(NavCommand::End), 0.0);
    }

    #[test]
    fn invalid_heights_are_clamped_and_reported_without_stopping() {
        let mut r = Recorder::uniform(10, 50.0, 0);
        r.engine.notify_resize(100.0);
        r.engine
            .update_items(10, HeightSource::from_fn(|i| if i == 3 { -1.0 } else { 50.0 }));

        assert_eq!(r.engine.position_index().height_at(3), 1.0);
        assert!(matches!(
            r.diagnostics.borrow()[0],
            Diagnostic::ClampedHeights { count: 1, first_index: 3, .. }
        ));
        assert!(!r.engine.visible_range().is_empty());
    }
}

mod navigation_surface {
    use super::*;

    #[test]
    fn navigate_does_not_move_viewport() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        r.engine.notify_resize(500.0);
        let target = r.engine.navigate(NavCommand::ScrollToIndex(999));
        assert_eq!(target, 49_500.0);
        assert_eq!(r.engine.viewport().scroll_offset, 0.0);
    }

    #[test]
    fn navigate_starts_from_notified_offset_before_frame() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        r.engine.notify_resize(500.0);
        r.engine.notify_scroll(10_000.0);

        assert_eq!(r.engine.navigate(NavCommand::StepForward), 10_050.0);
        assert_eq!(r.engine.navigate(NavCommand::PageForward), 10_500.0);
        assert_eq!(r.engine.navigate(NavCommand::StepBackward), 9_950.0);
        assert_eq!(r.engine.viewport().scroll_offset, 0.0);
    }

    #[test]
    fn out_of_range_index_reports_diagnostic() {
        let mut r = Recorder::uniform(10, 50.0, 0);
        r.engine.notify_resize(100.0);
        assert_eq!(r.engine.navigate(NavCommand::ScrollToIndex(99)), 400.0);
        assert_eq!(
            *r.diagnostics.borrow(),
            vec![Diagnostic::IndexOutOfRange {
                index: 99,
                count: 10
            }]
        );
    }
}

mod disposal {
    use super::*;

    #[test]
    fn dispose_mid_burst_cancels_everything() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        r.engine.notify_resize(500.0);
        r.take_ranges();

        r.engine.notify_scroll(5000.0);
        assert_eq!(r.engine.outstanding_handles(), 2);

        r.engine.dispose();
        assert_eq!(r.engine.outstanding_handles(), 0);

        r.frame();
        r.clock.advance(Duration::from_secs(1));
        r.engine.tick();
        assert!(r.take_ranges().is_empty());
        assert_eq!(*r.activity.borrow(), vec![true]);
    }

    #[test]
    fn calls_after_dispose_are_reported_no_ops() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        r.engine.dispose();
        r.engine.dispose();

        r.engine.notify_scroll(100.0);
        r.engine.notify_resize(300.0);
        r.engine.update_items(5, HeightSource::Uniform(1.0));
        assert_eq!(r.engine.navigate(NavCommand::End), 0.0);
        r.frame();

        assert!(r.take_ranges().is_empty());
        let operations: Vec<_> = r
            .diagnostics
            .borrow()
            .iter()
            .map(|d| match d {
                Diagnostic::DisposedHandleUse { operation } => *operation,
                other => panic!("unexpected diagnostic {other:?}"),
            })
            .collect();
        assert_eq!(
            operations,
            vec!["notify_scroll", "notify_resize", "update_items", "navigate"]
        );
        assert_eq!(r.engine.position_index().len(), 1000);
    }

    #[test]
    fn listeners_registered_after_dispose_are_rejected() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        r.engine.dispose();

        let calls = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&calls);
        let range_id = r
            .engine
            .on_visible_range_change(move |_| *sink.borrow_mut() += 1);
        let activity_id = r.engine.on_scroll_activity_change(|_| {});

        r.engine.notify_scroll(500.0);
        r.frame();
        assert_eq!(*calls.borrow(), 0);
        assert!(!r.engine.remove_listener(range_id));
        assert!(!r.engine.remove_listener(activity_id));
        assert_eq!(
            r.diagnostics.borrow()[..2],
            [
                Diagnostic::DisposedHandleUse {
                    operation: "on_visible_range_change"
                },
                Diagnostic::DisposedHandleUse {
                    operation: "on_scroll_activity_change"
                },
            ]
        );
    }

    #[test]
    fn drop_disposes() {
        let clock = ManualClock::new();
        let mut engine = Engine::with_clock(
            10,
            HeightSource::Uniform(10.0),
            EngineConfig::default(),
            Rc::new(clock.clone()),
        );
        engine.notify_scroll(20.0);
        assert_eq!(engine.outstanding_handles(), 2);
        drop(engine);
    }
}

mod listeners {
    use super::*;

    #[test]
    fn removed_listener_is_not_called() {
        let mut r = Recorder::uniform(1000, 50.0, 0);
        let extra = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&extra);
        let id = r
            .engine
            .on_visible_range_change(move |_| *sink.borrow_mut() += 1);

        r.engine.notify_resize(500.0);
        assert_eq!(*extra.borrow(), 1);

        assert!(r.engine.remove_listener(id));
        assert!(!r.engine.remove_listener(id));
        r.engine.notify_resize(250.0);
        assert_eq!(*extra.borrow(), 1);
        assert_eq!(r.take_ranges().len(), 2);
    }

    #[test]
    fn zero_settle_delay_is_sanitized() {
        let engine = Engine::with_clock(
            1,
            HeightSource::Uniform(1.0),
            EngineConfig {
                overscan_count: 0,
                settle_delay: Duration::ZERO,
            },
            Rc::new(ManualClock::new()),
        );
        assert_eq!(engine.config().settle_delay, Duration::from_millis(1));
    }
}
