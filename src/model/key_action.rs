//! Domain-level keyboard actions independent of key bindings.

use super::nav_command::NavCommand;

/// Actions the terminal demo can map key bindings to.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Translate through the engine and scroll to the result.
    Navigate(NavCommand),
    /// Leave the demo.
    Quit,
}
