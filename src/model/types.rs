//! Core engine newtypes and viewport state.

use super::diagnostic::Diagnostic;

/// Smallest height an item may occupy. Non-positive heights are clamped to this.
pub const MIN_ITEM_HEIGHT: f64 = 1.0;

/// Largest height an item may occupy. Keeps every prefix sum finite.
pub const MAX_ITEM_HEIGHT: f64 = 1.0e9;

/// Item index within the virtualized sequence. 0-indexed internally, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ItemIndex(usize);

impl ItemIndex {
    /// Create a new ItemIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the 1-based index for display purposes.
    pub fn display(&self) -> usize {
        self.0 + 1
    }

    /// Get the next item index.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Get the previous item index, saturating at 0.
    pub fn prev(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<usize> for ItemIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Scroll position and visible extent along the single scroll axis.
///
/// # Invariants
/// - `scroll_offset >= 0` and finite
/// - `extent >= 0` and finite
///
/// Construct through [`Viewport::sanitized`] when values come from the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Distance from the start of the list to the top edge of the viewport.
    pub scroll_offset: f64,
    /// Visible length of the viewport along the scroll axis.
    pub extent: f64,
}

impl Viewport {
    /// Create a viewport from values already known to be valid.
    pub fn new(scroll_offset: f64, extent: f64) -> Self {
        debug_assert!(scroll_offset >= 0.0 && scroll_offset.is_finite());
        debug_assert!(extent >= 0.0 && extent.is_finite());
        Self {
            scroll_offset,
            extent,
        }
    }

    /// Create a viewport from raw host values, clamping invalid ones to 0.
    ///
    /// Returns the viewport together with one diagnostic per clamped field.
    pub fn sanitized(scroll_offset: f64, extent: f64) -> (Self, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();

        let (scroll_offset, scroll_diag) = sanitize_scroll_offset(scroll_offset);
        diagnostics.extend(scroll_diag);
        let (extent, extent_diag) = sanitize_extent(extent);
        diagnostics.extend(extent_diag);

        (
            Self {
                scroll_offset,
                extent,
            },
            diagnostics,
        )
    }

    /// Offset of the bottom edge of the viewport.
    pub fn end_offset(&self) -> f64 {
        self.scroll_offset + self.extent
    }
}

/// Clamp a raw scroll offset to a finite, non-negative value.
pub fn sanitize_scroll_offset(value: f64) -> (f64, Option<Diagnostic>) {
    if value.is_finite() && value >= 0.0 {
        (value, None)
    } else {
        (0.0, Some(Diagnostic::InvalidScrollOffset { value }))
    }
}

/// Clamp a raw viewport extent to a finite, non-negative value.
pub fn sanitize_extent(value: f64) -> (f64, Option<Diagnostic>) {
    if value.is_finite() && value >= 0.0 {
        (value, None)
    } else {
        (0.0, Some(Diagnostic::InvalidViewportExtent { value }))
    }
}

/// Clamp a signed item count from an untyped host to a valid `usize`.
pub fn sanitize_item_count(value: i64) -> (usize, Option<Diagnostic>) {
    if value < 0 {
        (0, Some(Diagnostic::NegativeItemCount { value }))
    } else {
        (usize::try_from(value).unwrap_or(usize::MAX), None)
    }
}
