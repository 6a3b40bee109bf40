//! Recoverable engine conditions.
//!
//! The engine never returns errors across its event-ingestion boundary.
//! Invalid input is clamped to the nearest valid value, calls on a disposed
//! engine become no-ops, and each such event is surfaced as a [`Diagnostic`]:
//! logged through `tracing` and forwarded to any registered diagnostic
//! listeners.

use thiserror::Error;

/// A recoverable condition the engine absorbed locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// Summary of all clamped heights in one position index build.
    #[error("{count} item height(s) clamped into range (first at index {first_index}: {first_value})")]
    ClampedHeights {
        /// Number of items whose height was clamped.
        count: usize,
        /// Index of the first clamped item.
        first_index: usize,
        /// Raw height of the first clamped item.
        first_value: f64,
    },

    /// Item count below zero from an untyped host.
    #[error("Negative item count {value}; treated as 0")]
    NegativeItemCount {
        /// Raw count received.
        value: i64,
    },

    /// Scroll offset that was negative or non-finite.
    #[error("Invalid scroll offset {value}; clamped to 0")]
    InvalidScrollOffset {
        /// Raw offset received.
        value: f64,
    },

    /// Viewport extent that was negative or non-finite.
    #[error("Invalid viewport extent {value}; clamped to 0")]
    InvalidViewportExtent {
        /// Raw extent received.
        value: f64,
    },

    /// Navigation target beyond the last item.
    #[error("Navigation index {index} out of range for {count} item(s)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Item count at the time of the request.
        count: usize,
    },

    /// Scroll fraction outside `[0, 1]` or non-finite.
    #[error("Scroll fraction {value} outside [0, 1]; clamped")]
    InvalidFraction {
        /// Raw fraction received.
        value: f64,
    },

    /// Settle delay of zero; replaced with the minimum.
    #[error("Settle delay must be > 0ms; using {used_ms}ms")]
    InvalidSettleDelay {
        /// Delay actually used.
        used_ms: u64,
    },

    /// A call arrived after the engine was disposed.
    #[error("'{operation}' called on a disposed engine; ignored")]
    DisposedHandleUse {
        /// Name of the ignored operation.
        operation: &'static str,
    },
}

impl Diagnostic {
    /// Emit this diagnostic to the tracing subscriber.
    pub fn log(&self) {
        tracing::warn!(diagnostic = ?self, "{}", self);
    }
}
