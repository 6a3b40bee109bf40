//! Demo list styling.
//!
//! Distinct styles for captions, loaded thumbnails, pending placeholders
//! and the status bar.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled by the `--no-color` flag or the `NO_COLOR`
/// environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ListStyles =====

/// Styles for rows of the demo list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyles {
    /// File name row.
    pub caption: Style,
    /// Pixel dimensions after the file name.
    pub dimensions: Style,
    /// Rendered thumbnail blocks.
    pub thumbnail: Style,
    /// Placeholder shown while scrolling.
    pub pending: Style,
    /// Bottom status bar.
    pub status: Style,
}

impl ListStyles {
    /// Styles honoring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if !config.colors_enabled() {
            return Self {
                caption: Style::default().add_modifier(Modifier::BOLD),
                dimensions: Style::default(),
                thumbnail: Style::default(),
                pending: Style::default().add_modifier(Modifier::DIM),
                status: Style::default().add_modifier(Modifier::REVERSED),
            };
        }

        Self {
            caption: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            dimensions: Style::default().fg(Color::DarkGray),
            thumbnail: Style::default().fg(Color::Green),
            pending: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            status: Style::default().bg(Color::Blue).fg(Color::White),
        }
    }
}

impl Default for ListStyles {
    fn default() -> Self {
        Self::new()
    }
}
