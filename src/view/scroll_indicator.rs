//! Scroll activity indicator for the status bar.

use crate::engine::ScrollPhase;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

const SCROLLING_LABEL: &str = "[SCROLLING] ";
const SETTLING_LABEL: &str = "[SETTLING] ";
const IDLE_LABEL: &str = "[IDLE] ";

/// Status bar span reflecting the engine's scroll phase.
///
/// Stateless: the phase is read from the engine on every draw.
///
/// # Examples
///
/// ```rust
/// use vlist::engine::ScrollPhase;
/// use vlist::view::scroll_indicator::ScrollIndicator;
///
/// let span = ScrollIndicator::new(ScrollPhase::Scrolling).render();
/// assert_eq!(span.content, "[SCROLLING] ");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScrollIndicator {
    phase: ScrollPhase,
}

impl ScrollIndicator {
    /// Create an indicator for `phase`.
    pub fn new(phase: ScrollPhase) -> Self {
        Self { phase }
    }

    /// Render the indicator as a ratatui Span.
    ///
    /// - `Scrolling` → bold yellow
    /// - `Settling` → yellow
    /// - `Idle` → gray
    pub fn render(&self) -> Span<'static> {
        match self.phase {
            ScrollPhase::Scrolling => Span::styled(
                SCROLLING_LABEL,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            ScrollPhase::Settling => {
                Span::styled(SETTLING_LABEL, Style::default().fg(Color::Yellow))
            }
            ScrollPhase::Idle => Span::styled(IDLE_LABEL, Style::default().fg(Color::Gray)),
        }
    }
}

#[cfg(test)]
#[path = "scroll_indicator_tests.rs"]
mod tests;
