//! Layout and input constants for the demo.

/// Height of the status bar in lines.
///
/// The list viewport extent is the terminal height minus this.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_STEP_ROWS: f64 = 3.0;

/// Default number of synthetic items.
pub const DEFAULT_DEMO_ITEMS: usize = 10_000;

/// Widest thumbnail drawn, in columns.
pub const MAX_THUMB_COLS: u16 = 48;

/// Text shown in place of a thumbnail while scrolling is active.
pub const PENDING_THUMBNAIL: &str = "… pending thumbnail";
