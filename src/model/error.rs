//! Error types for the vlist binary and its input layers.
//!
//! The engine core never fails: it clamps and reports [`Diagnostic`]s.
//! Errors here belong to the outer shell: reading configuration, setting up
//! logging, reading event traces and driving the terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`ConfigError`] - Config file read/parse/validation failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - [`TraceError`] - Trace file read failures and malformed trace lines
//!   - `std::io::Error` - Terminal failures
//!
//! # Error Recovery Strategy
//!
//! Malformed trace lines are **non-fatal**: they are collected with their
//! line numbers, reported, and skipped so the rest of the trace still
//! replays. Everything else propagates to `main`.
//!
//! [`Diagnostic`]: super::Diagnostic

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use vlist::model::error::{AppError, TraceError};
///
/// fn run_app() -> Result<(), AppError> {
///     // TraceError automatically converts to AppError via From
///     let _trace = read_trace()?;
///     Ok(())
/// }
/// # fn read_trace() -> Result<(), TraceError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Trace input could not be read.
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// Terminal or output stream failure.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures reading or parsing an event trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Trace file could not be read.
    #[error("Failed to read trace {path:?}: {source}")]
    Read {
        /// Path of the trace file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A trace line is not a valid event.
    #[error("Invalid trace event at line {line}: {message}")]
    InvalidEvent {
        /// 1-based line number.
        line: usize,
        /// Parser message.
        message: String,
    },
}

impl TraceError {
    /// Line number for per-line errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidEvent { line, .. } => Some(*line),
            Self::Read { .. } => None,
        }
    }
}
