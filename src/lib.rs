//! vlist - list virtualization engine
//!
//! Computes which items of a large, variable-height list intersect a
//! scrolling viewport, coalesces scroll notifications into one recompute
//! per frame and reports when scrolling settles.
//!
//! Pure Core / Impure Shell: `model` and `view_state` are pure, `engine`
//! owns scheduling state, and `trace`, `view` and the binary are the
//! hosts that drive it.

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod trace;
pub mod view;
pub mod view_state;

pub use engine::{Engine, ListenerId};
