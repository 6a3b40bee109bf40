//! Rows of the virtualized demo list.
//!
//! Only items inside the resolved [`VisibleRange`] are turned into lines;
//! everything else in the list is never touched while drawing.

use ratatui::text::{Line, Span};

use crate::model::Viewport;
use crate::view::constants::{MAX_THUMB_COLS, PENDING_THUMBNAIL};
use crate::view::gallery::ImageFile;
use crate::view::styles::ListStyles;
use crate::view_state::{PositionIndex, VisibleRange};

/// Snapshot of what the list pane needs for one draw.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    /// All items; only the resolved range is read.
    pub items: &'a [ImageFile],
    /// Position index the range was resolved against.
    pub index: &'a PositionIndex,
    /// Items to draw.
    pub range: VisibleRange,
    /// Applied viewport; rows are positioned relative to its scroll offset.
    pub viewport: Viewport,
    /// Draw placeholders instead of thumbnails.
    pub scrolling: bool,
    /// Row styles.
    pub styles: &'a ListStyles,
}

impl ListView<'_> {
    /// Compose exactly `height` lines for a pane `width` columns wide.
    ///
    /// Overscan items outside the pane are resolved but clipped here.
    pub fn rows(&self, height: u16, width: u16) -> Vec<Line<'static>> {
        let mut rows = vec![Line::default(); usize::from(height)];

        for item in self.range.indices() {
            let i = item.get();
            let Some(file) = self.items.get(i) else {
                continue;
            };
            let top = (self.index.offset_at(i) - self.viewport.scroll_offset).floor() as i64;

            for row in 0..file.rows() {
                let y = top + i64::from(row);
                if (0..i64::from(height)).contains(&y) {
                    rows[y as usize] = self.item_row(file, row, width);
                }
            }
        }

        rows
    }

    fn item_row(&self, file: &ImageFile, row: u16, width: u16) -> Line<'static> {
        if row == 0 {
            return Line::from(vec![
                Span::styled(format!("▸ {}", file.name), self.styles.caption),
                Span::styled(
                    format!("  {}×{}", file.width, file.height),
                    self.styles.dimensions,
                ),
            ]);
        }

        if self.scrolling {
            let text = if row == 1 { PENDING_THUMBNAIL } else { "┊" };
            return Line::from(vec![
                Span::raw("  "),
                Span::styled(text, self.styles.pending),
            ]);
        }

        let cols = file.thumb_cols(MAX_THUMB_COLS.min(width.saturating_sub(2)));
        Line::from(vec![
            Span::raw("  "),
            Span::styled("▒".repeat(usize::from(cols)), self.styles.thumbnail),
        ])
    }
}
