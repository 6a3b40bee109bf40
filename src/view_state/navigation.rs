//! Navigation command translation.
//!
//! Pure functions that turn a [`NavCommand`] into a target scroll offset.
//! The engine never moves the viewport itself; the renderer applies the
//! target and the resulting scroll notification flows back in.
//!
//! # Clamping Behavior
//! Every target is clamped to `[0, max(0, total_extent - viewport_extent)]`,
//! so navigation can never scroll past the last item or before the first.

use crate::model::{Align, Diagnostic, NavCommand, Viewport};

use super::position_index::PositionIndex;

/// Largest valid scroll offset for this index and viewport.
pub fn max_scroll_offset(index: &PositionIndex, viewport: &Viewport) -> f64 {
    (index.total_extent() - viewport.extent).max(0.0)
}

/// Clamp an offset into the valid scroll range.
pub fn clamp_scroll_offset(index: &PositionIndex, viewport: &Viewport, offset: f64) -> f64 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max_scroll_offset(index, viewport))
}

/// Translate a navigation command into a target scroll offset.
///
/// Returns the target along with any diagnostic raised by invalid input
/// (out-of-range index, fraction outside `[0, 1]`).
pub fn translate(
    index: &PositionIndex,
    viewport: &Viewport,
    command: NavCommand,
) -> (f64, Option<Diagnostic>) {
    let current = viewport.scroll_offset;
    let mut diagnostic = None;

    let raw = match command {
        NavCommand::StepForward => current + step_height_forward(index, current),
        NavCommand::StepBackward => step_backward_target(index, current),
        NavCommand::PageForward => current + viewport.extent,
        NavCommand::PageBackward => current - viewport.extent,
        NavCommand::Home => 0.0,
        NavCommand::End => max_scroll_offset(index, viewport),
        NavCommand::ScrollToIndex(target) => {
            let (item, diag) = clamp_item(index, target);
            diagnostic = diag;
            item.map_or(0.0, |i| index.offset_at(i))
        }
        NavCommand::ScrollToIndexAligned(target, align) => {
            let (item, diag) = clamp_item(index, target);
            diagnostic = diag;
            item.map_or(0.0, |i| aligned_offset(index, viewport, i, align))
        }
        NavCommand::ScrollToFraction(fraction) => {
            let clamped = if fraction.is_finite() {
                fraction.clamp(0.0, 1.0)
            } else {
                0.0
            };
            if clamped != fraction {
                diagnostic = Some(Diagnostic::InvalidFraction { value: fraction });
            }
            max_scroll_offset(index, viewport) * clamped
        }
    };

    (clamp_scroll_offset(index, viewport, raw), diagnostic)
}

/// Offset that places `item` according to `align`.
fn aligned_offset(index: &PositionIndex, viewport: &Viewport, item: usize, align: Align) -> f64 {
    let top = index.offset_at(item);
    let bottom = index.end_of(item);

    match align {
        Align::Start => top,
        Align::End => bottom - viewport.extent,
        Align::Center => top - (viewport.extent - index.height_at(item)) / 2.0,
        Align::Nearest => {
            if top < viewport.scroll_offset {
                top
            } else if bottom > viewport.end_offset() {
                // Item taller than the viewport keeps its top edge visible.
                (bottom - viewport.extent).min(top)
            } else {
                viewport.scroll_offset
            }
        }
    }
}

/// Clamp a requested item index to the last item.
fn clamp_item(index: &PositionIndex, target: usize) -> (Option<usize>, Option<Diagnostic>) {
    match index.last_index() {
        None => (
            None,
            Some(Diagnostic::IndexOutOfRange {
                index: target,
                count: 0,
            }),
        ),
        Some(last) if target > last => (
            Some(last),
            Some(Diagnostic::IndexOutOfRange {
                index: target,
                count: index.len(),
            }),
        ),
        Some(_) => (Some(target), None),
    }
}

/// Height of the item at the top edge of the viewport.
fn step_height_forward(index: &PositionIndex, scroll_offset: f64) -> f64 {
    index
        .index_at_offset(scroll_offset)
        .map_or(0.0, |i| index.height_at(i))
}

/// Top of the item at the top edge when it is cut off, otherwise the top of
/// the item above it.
fn step_backward_target(index: &PositionIndex, scroll_offset: f64) -> f64 {
    let Some(first) = index.index_at_offset(scroll_offset) else {
        return 0.0;
    };
    let top = index.offset_at(first);
    if top < scroll_offset {
        top
    } else if first > 0 {
        index.offset_at(first - 1)
    } else {
        0.0
    }
}
