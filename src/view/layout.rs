//! Demo screen layout: list pane above a one-line status bar.

use crate::engine::ScrollPhase;
use crate::view::constants::STATUS_BAR_HEIGHT;
use crate::view::list_view::ListView;
use crate::view::scroll_indicator::ScrollIndicator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Figures shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusInfo {
    /// Total items in the list.
    pub item_count: usize,
    /// Resolved range bounds, `None` when empty.
    pub bounds: Option<(usize, usize)>,
    /// Applied scroll offset.
    pub scroll_offset: f64,
    /// Largest valid scroll offset.
    pub max_scroll_offset: f64,
    /// Current scroll phase.
    pub phase: ScrollPhase,
    /// Range-change callbacks received so far.
    pub range_updates: u64,
}

/// Split `area` into the list pane and the status bar.
pub fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                    // List pane
            Constraint::Length(STATUS_BAR_HEIGHT), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Viewport extent for a terminal of `height` rows.
pub fn list_height(height: u16) -> u16 {
    height.saturating_sub(STATUS_BAR_HEIGHT)
}

/// Render the list and status bar.
pub fn render_layout(frame: &mut Frame, view: &ListView<'_>, status: &StatusInfo) {
    let (list_area, status_area) = split(frame.area());

    let rows = view.rows(list_area.height, list_area.width);
    frame.render_widget(Paragraph::new(rows), list_area);

    render_status_bar(frame, status_area, view, status);
}

fn render_status_bar(frame: &mut Frame, area: Rect, view: &ListView<'_>, status: &StatusInfo) {
    let range = match status.bounds {
        Some((start, end)) => format!("items {}-{}", start + 1, end + 1),
        None => "no items".to_string(),
    };
    let text = format!(
        "{range} of {} | row {:.0}/{:.0} | updates {} | q quit",
        status.item_count, status.scroll_offset, status.max_scroll_offset, status.range_updates
    );

    let line = Line::from(vec![
        ScrollIndicator::new(status.phase).render(),
        Span::raw(text),
    ]);
    frame.render_widget(Paragraph::new(line).style(view.styles.status), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_takes_the_last_row() {
        let (list, status) = split(Rect::new(0, 0, 80, 24));
        assert_eq!(list.height, 23);
        assert_eq!(status.y, 23);
        assert_eq!(status.height, STATUS_BAR_HEIGHT);
    }

    #[test]
    fn list_height_saturates_on_tiny_terminals() {
        assert_eq!(list_height(24), 23);
        assert_eq!(list_height(0), 0);
    }
}
