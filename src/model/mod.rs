//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod diagnostic;
pub mod error;
pub mod height_source;
pub mod key_action;
pub mod nav_command;
pub mod types;

// Re-export for convenience
pub use diagnostic::Diagnostic;
pub use error::{AppError, TraceError};
pub use height_source::HeightSource;
pub use key_action::KeyAction;
pub use nav_command::{Align, NavCommand};
pub use types::{ItemIndex, Viewport, MAX_ITEM_HEIGHT, MIN_ITEM_HEIGHT};
