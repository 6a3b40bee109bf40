//! Event trace parsing and replay.
//!
//! A trace is JSONL: one event per line, tagged by `event`, each stamped
//! with `at_ms` on a virtual clock. Replay feeds the events through an
//! [`Engine`] on a [`ManualClock`] and collects everything a renderer would
//! observe.
//!
//! ```text
//! {"at_ms":0,"event":"create","item_count":1000,"heights":{"uniform":50}}
//! {"at_ms":1,"event":"resize","extent":500}
//! {"at_ms":2,"event":"scroll","offset":2000}
//! {"at_ms":16,"event":"frame"}
//! {"at_ms":20,"event":"navigate","command":{"scroll_to_index":999}}
//! ```

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::{Engine, ManualClock};
use crate::model::types::sanitize_item_count;
use crate::model::{HeightSource, NavCommand, TraceError};
use crate::view_state::VisibleRange;

/// Height source as written in a trace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceHeights {
    /// Every item has this height.
    Uniform(f64),
    /// Heights cycle through this list.
    Cycle(Vec<f64>),
}

impl From<TraceHeights> for HeightSource {
    fn from(heights: TraceHeights) -> Self {
        match heights {
            TraceHeights::Uniform(height) => HeightSource::Uniform(height),
            TraceHeights::Cycle(heights) => HeightSource::from_heights(heights),
        }
    }
}

/// One host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Create (or replace) the engine.
    Create {
        /// Signed so that negative counts reach the engine boundary.
        item_count: i64,
        /// Height source.
        heights: TraceHeights,
    },
    /// Scroll notification.
    Scroll {
        /// Raw scroll offset.
        offset: f64,
    },
    /// Viewport resize notification.
    Resize {
        /// Raw viewport extent.
        extent: f64,
    },
    /// Animation frame boundary.
    Frame,
    /// Navigation request.
    Navigate {
        /// Command to translate.
        command: NavCommand,
    },
    /// Replace items.
    UpdateItems {
        /// Signed item count.
        item_count: i64,
        /// Height source.
        heights: TraceHeights,
    },
    /// Tear the engine down.
    Dispose,
}

/// A timestamped trace event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraceRecord {
    /// Virtual time of the event.
    pub at_ms: u64,
    /// The event itself.
    #[serde(flatten)]
    pub event: TraceEvent,
}

/// Something a renderer would observe during replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "output", rename_all = "snake_case")]
pub enum ReplayOutput {
    /// Visible range changed.
    Range {
        /// Virtual time.
        at_ms: u64,
        /// First index, `None` for the empty sentinel.
        start: Option<usize>,
        /// Last index, `None` for the empty sentinel.
        end: Option<usize>,
        /// Top edge of the range.
        start_offset: f64,
        /// Bottom edge of the range.
        end_offset: f64,
    },
    /// Scroll activity changed.
    Activity {
        /// Virtual time.
        at_ms: u64,
        /// New activity state.
        scrolling: bool,
    },
    /// Navigation target.
    Navigate {
        /// Virtual time.
        at_ms: u64,
        /// Offset the renderer should scroll to.
        target: f64,
    },
    /// Diagnostic absorbed by the engine.
    Diagnostic {
        /// Virtual time.
        at_ms: u64,
        /// Human-readable diagnostic.
        message: String,
    },
    /// Event ignored because no engine exists yet.
    Skipped {
        /// Virtual time.
        at_ms: u64,
        /// Why the event was skipped.
        reason: String,
    },
}

impl ReplayOutput {
    fn range(at_ms: u64, range: &VisibleRange) -> Self {
        let (start_offset, end_offset) = match range {
            VisibleRange::Empty => (0.0, 0.0),
            VisibleRange::Span {
                start_offset,
                end_offset,
                ..
            } => (*start_offset, *end_offset),
        };
        let bounds = range.bounds();
        Self::Range {
            at_ms,
            start: bounds.map(|(s, _)| s),
            end: bounds.map(|(_, e)| e),
            start_offset,
            end_offset,
        }
    }
}

/// Parse one trace line. Blank lines yield `Ok(None)`.
///
/// # Errors
/// `TraceError::InvalidEvent` carrying `line_number` for malformed JSON or
/// unknown events.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<TraceRecord>, TraceError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| TraceError::InvalidEvent {
            line: line_number,
            message: e.to_string(),
        })
}

/// Parse a whole trace, collecting valid records and per-line errors separately.
pub fn parse_trace(contents: &str) -> (Vec<TraceRecord>, Vec<TraceError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        match parse_line(line, index + 1) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }

    (records, errors)
}

/// Read and parse a trace file.
///
/// # Errors
/// `TraceError::Read` if the file cannot be read. Malformed lines are
/// returned alongside the records, not as an error.
pub fn read_trace(path: &Path) -> Result<(Vec<TraceRecord>, Vec<TraceError>), TraceError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TraceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_trace(&contents))
}

/// Outputs recorded by engine listeners, stamped once the event returns.
#[derive(Debug)]
enum Observed {
    Range(VisibleRange),
    Activity(bool),
    Diagnostic(String),
}

/// Replays trace records through an engine on a virtual clock.
pub struct Replayer {
    config: EngineConfig,
    clock: ManualClock,
    engine: Option<Engine>,
    observed: Rc<RefCell<Vec<Observed>>>,
}

impl Replayer {
    /// Create a replayer; engines it creates use `config`.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            clock: ManualClock::new(),
            engine: None,
            observed: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Apply one record, returning what the renderer would observe.
    pub fn apply(&mut self, record: &TraceRecord) -> Vec<ReplayOutput> {
        let at_ms = record.at_ms;
        self.clock.set(Duration::from_millis(at_ms));
        let mut outputs = Vec::new();

        if let TraceEvent::Create {
            item_count,
            heights,
        } = &record.event
        {
            let engine = self.create_engine(*item_count, heights.clone());
            // Initial range is part of what the renderer sees first.
            outputs.push(ReplayOutput::range(at_ms, &engine.visible_range()));
            self.engine = Some(engine);
        } else if let Some(engine) = self.engine.as_mut() {
            match &record.event {
                TraceEvent::Scroll { offset } => engine.notify_scroll(*offset),
                TraceEvent::Resize { extent } => engine.notify_resize(*extent),
                TraceEvent::Frame => engine.tick(),
                TraceEvent::Navigate { command } => {
                    let target = engine.navigate(*command);
                    outputs.push(ReplayOutput::Navigate { at_ms, target });
                }
                TraceEvent::UpdateItems {
                    item_count,
                    heights,
                } => {
                    let (count, diagnostic) = sanitize_item_count(*item_count);
                    if let Some(diagnostic) = diagnostic {
                        engine.report(diagnostic);
                    }
                    engine.update_items(count, heights.clone().into());
                }
                TraceEvent::Dispose => engine.dispose(),
                TraceEvent::Create { .. } => {}
            }
        } else {
            tracing::warn!(at_ms, event = ?record.event, "Trace event before create");
            outputs.push(ReplayOutput::Skipped {
                at_ms,
                reason: "no engine; trace must start with a create event".to_string(),
            });
        }

        // Navigation target is returned synchronously; listener output follows it.
        let observed = std::mem::take(&mut *self.observed.borrow_mut());
        outputs.extend(observed.into_iter().map(|o| match o {
            Observed::Range(range) => ReplayOutput::range(at_ms, &range),
            Observed::Activity(scrolling) => ReplayOutput::Activity { at_ms, scrolling },
            Observed::Diagnostic(message) => ReplayOutput::Diagnostic { at_ms, message },
        }));
        outputs
    }

    /// Apply every record in order.
    pub fn run(&mut self, records: &[TraceRecord]) -> Vec<ReplayOutput> {
        records.iter().flat_map(|r| self.apply(r)).collect()
    }

    /// The current engine, if a create event has been seen.
    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    fn create_engine(&mut self, item_count: i64, heights: TraceHeights) -> Engine {
        let (count, count_diag) = sanitize_item_count(item_count);
        let mut engine = Engine::with_clock(
            count,
            heights.into(),
            self.config,
            Rc::new(self.clock.clone()),
        );

        let sink = Rc::clone(&self.observed);
        engine.on_visible_range_change(move |r| sink.borrow_mut().push(Observed::Range(*r)));
        let sink = Rc::clone(&self.observed);
        engine.on_scroll_activity_change(move |a| sink.borrow_mut().push(Observed::Activity(*a)));
        let sink = Rc::clone(&self.observed);
        engine.on_diagnostic(move |d| sink.borrow_mut().push(Observed::Diagnostic(d.to_string())));

        if let Some(diagnostic) = count_diag {
            engine.report(diagnostic);
        }
        engine
    }
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod tests;
