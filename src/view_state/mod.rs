//! View-state layer - position index, visible range and navigation
//!
//! Pure, allocation-light computations the engine runs on every recompute.
//! Nothing here schedules work or holds mutable state between calls.
//!
//! # Module Structure
//!
//! - `position_index`: PositionIndex - prefix-sum table, O(log n) offset search
//! - `visible_range`: VisibleRange and `resolve` - items to render for a viewport
//! - `navigation`: `translate` - NavCommand to clamped target scroll offset

pub mod navigation;
pub mod position_index;
pub mod visible_range;

pub use position_index::PositionIndex;
pub use visible_range::{resolve, VisibleRange};
