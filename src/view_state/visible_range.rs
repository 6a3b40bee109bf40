//! Visible range calculation

use crate::model::{ItemIndex, Viewport};

use super::position_index::PositionIndex;

/// Range of items the renderer should materialize.
///
/// Computed via binary search on the prefix-sum offsets, widened by overscan.
///
/// # Invariants
/// - `start_index <= end_index <= item_count - 1` for `Span`
/// - `start_offset` / `end_offset` bound the pixel span of the inclusive index range
/// - `Empty` only when there are no items
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VisibleRange {
    /// No items to render.
    #[default]
    Empty,
    /// Inclusive range of items to render.
    Span {
        /// First item to render (inclusive).
        start_index: ItemIndex,
        /// Last item to render (inclusive).
        end_index: ItemIndex,
        /// Top edge of `start_index`.
        start_offset: f64,
        /// Bottom edge of `end_index`.
        end_offset: f64,
    },
}

impl VisibleRange {
    /// Number of items in the range.
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Span {
                start_index,
                end_index,
                ..
            } => end_index.get() - start_index.get() + 1,
        }
    }

    /// Check if range is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// `(start, end)` inclusive index bounds, `None` for the empty sentinel.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match self {
            Self::Empty => None,
            Self::Span {
                start_index,
                end_index,
                ..
            } => Some((start_index.get(), end_index.get())),
        }
    }

    /// Iterate over item indices in the range.
    pub fn indices(&self) -> impl Iterator<Item = ItemIndex> {
        let range = match self.bounds() {
            Some((start, end)) => start..end + 1,
            None => 0..0,
        };
        range.map(ItemIndex::new)
    }

    /// Check if a specific item index is in the range.
    pub fn contains(&self, index: ItemIndex) -> bool {
        self.bounds()
            .is_some_and(|(start, end)| (start..=end).contains(&index.get()))
    }

    /// True when both ranges cover the same indices.
    ///
    /// Offsets are ignored: renderers only need to act on index changes.
    pub fn same_indices(&self, other: &Self) -> bool {
        self.bounds() == other.bounds()
    }
}

/// Resolve the range of items to render for a viewport.
///
/// An item counts as visible when any part of it falls within the viewport;
/// partially visible items at either edge are always included. `overscan`
/// extra items are added on each side, clamped to the list bounds.
pub fn resolve(index: &PositionIndex, viewport: &Viewport, overscan: usize) -> VisibleRange {
    let Some(last) = index.last_index() else {
        return VisibleRange::Empty;
    };
    let Some((first_visible, last_visible)) = visible_bounds(index, viewport) else {
        return VisibleRange::Empty;
    };

    let start = first_visible.saturating_sub(overscan);
    let end = last_visible.saturating_add(overscan).min(last);

    VisibleRange::Span {
        start_index: ItemIndex::new(start),
        end_index: ItemIndex::new(end),
        start_offset: index.offset_at(start),
        end_offset: index.end_of(end),
    }
}

/// Strictly visible `(first, last)` item indices, before overscan.
pub fn visible_bounds(index: &PositionIndex, viewport: &Viewport) -> Option<(usize, usize)> {
    let first = index.index_at_offset(viewport.scroll_offset)?;
    let last = index.index_at_offset(viewport.end_offset())?;
    Some((first, last.max(first)))
}
