//! PositionIndex - O(1) offset lookups and O(log n) offset search via a prefix-sum table
//!
//! Maps an item count and a height source onto per-item offsets and heights.
//! The table is built in one pass and never patched; any change to the item
//! count or height source produces a new index.
//!
//! # Complexity
//!
//! - `build`: O(n)
//! - `height_at` / `offset_at`: O(1)
//! - `total_extent`: O(1)
//! - `index_at_offset`: O(log n)

use crate::model::{Diagnostic, HeightSource, MAX_ITEM_HEIGHT, MIN_ITEM_HEIGHT};

/// Prefix-sum table of item offsets.
///
/// # Invariants
/// - `offsets[0] == 0`
/// - `offsets[i] == offsets[i - 1] + heights[i - 1]`
/// - every height lies in `[MIN_ITEM_HEIGHT, MAX_ITEM_HEIGHT]`, so offsets stay
///   finite and strictly increase
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PositionIndex {
    offsets: Vec<f64>,
    heights: Vec<f64>,
    total: f64,
}

impl PositionIndex {
    /// Builds the table for `item_count` items.
    ///
    /// Heights that are non-finite or `<= 0` are clamped to [`MIN_ITEM_HEIGHT`];
    /// heights above [`MAX_ITEM_HEIGHT`] are clamped down to it.
    /// Clamping is summarized in a single [`Diagnostic::ClampedHeights`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use vlist::model::HeightSource;
    /// # use vlist::view_state::position_index::PositionIndex;
    /// let (index, diagnostics) = PositionIndex::build(3, &HeightSource::Uniform(10.0));
    /// assert!(diagnostics.is_empty());
    /// assert_eq!(index.offset_at(2), 20.0);
    /// assert_eq!(index.total_extent(), 30.0);
    /// ```
    pub fn build(item_count: usize, source: &HeightSource) -> (Self, Vec<Diagnostic>) {
        let mut offsets = Vec::with_capacity(item_count);
        let mut heights = Vec::with_capacity(item_count);
        let mut running = 0.0;

        let mut clamped = 0usize;
        let mut first_bad: Option<(usize, f64)> = None;

        for index in 0..item_count {
            let raw = source.height_of(index);
            let height = if !raw.is_finite() || raw <= 0.0 {
                Some(MIN_ITEM_HEIGHT)
            } else if raw > MAX_ITEM_HEIGHT {
                Some(MAX_ITEM_HEIGHT)
            } else {
                None
            };
            let height = match height {
                Some(limit) => {
                    clamped += 1;
                    first_bad.get_or_insert((index, raw));
                    limit
                }
                None => raw,
            };

            offsets.push(running);
            heights.push(height);
            running += height;
        }

        let diagnostics = match first_bad {
            Some((first_index, first_value)) => vec![Diagnostic::ClampedHeights {
                count: clamped,
                first_index,
                first_value,
            }],
            None => Vec::new(),
        };

        tracing::debug!(
            item_count,
            total_extent = running,
            clamped,
            "Built position index"
        );

        (
            Self {
                offsets,
                heights,
                total: running,
            },
            diagnostics,
        )
    }

    /// Number of items in the index.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns true if the index contains no items.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Height of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height_at(&self, index: usize) -> f64 {
        self.heights[index]
    }

    /// Offset of the top edge of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn offset_at(&self, index: usize) -> f64 {
        self.offsets[index]
    }

    /// Offset one past the bottom edge of the item at `index`.
    pub fn end_of(&self, index: usize) -> f64 {
        self.offsets[index] + self.heights[index]
    }

    /// Total extent of all items; 0 when empty.
    pub fn total_extent(&self) -> f64 {
        self.total
    }

    /// Index of the last item, or `None` when empty.
    pub fn last_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Index of the item whose `[offset, offset + height)` span contains `offset`.
    ///
    /// - `offset <= 0` (or NaN) resolves to the first item
    /// - `offset >= total_extent()` resolves to the last item
    /// - `None` only when the index is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use vlist::model::HeightSource;
    /// # use vlist::view_state::position_index::PositionIndex;
    /// let source = HeightSource::from_heights(vec![10.0, 20.0, 15.0]);
    /// let (index, _) = PositionIndex::build(3, &source);
    /// assert_eq!(index.index_at_offset(0.0), Some(0));
    /// assert_eq!(index.index_at_offset(10.0), Some(1));
    /// assert_eq!(index.index_at_offset(29.9), Some(1));
    /// assert_eq!(index.index_at_offset(30.0), Some(2));
    /// assert_eq!(index.index_at_offset(1_000.0), Some(2));
    /// ```
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        let last = self.last_index()?;

        if offset.is_nan() || offset <= 0.0 {
            return Some(0);
        }
        if offset >= self.total {
            return Some(last);
        }

        // First item whose top edge is past `offset`, minus one.
        let after = self.offsets.partition_point(|&top| top <= offset);
        Some(after.saturating_sub(1).min(last))
    }
}
