//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::model::NavCommand;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings alongside the usual navigation keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let nav = KeyAction::Navigate;
        let entries = [
            // Step
            (KeyCode::Char('j'), KeyModifiers::NONE, nav(NavCommand::StepForward)),
            (KeyCode::Down, KeyModifiers::NONE, nav(NavCommand::StepForward)),
            (KeyCode::Char('k'), KeyModifiers::NONE, nav(NavCommand::StepBackward)),
            (KeyCode::Up, KeyModifiers::NONE, nav(NavCommand::StepBackward)),
            // Page
            (KeyCode::PageDown, KeyModifiers::NONE, nav(NavCommand::PageForward)),
            (KeyCode::Char('d'), KeyModifiers::CONTROL, nav(NavCommand::PageForward)),
            (KeyCode::Char(' '), KeyModifiers::NONE, nav(NavCommand::PageForward)),
            (KeyCode::PageUp, KeyModifiers::NONE, nav(NavCommand::PageBackward)),
            (KeyCode::Char('u'), KeyModifiers::CONTROL, nav(NavCommand::PageBackward)),
            // Jumps
            (KeyCode::Home, KeyModifiers::NONE, nav(NavCommand::Home)),
            (KeyCode::Char('g'), KeyModifiers::NONE, nav(NavCommand::Home)),
            (KeyCode::End, KeyModifiers::NONE, nav(NavCommand::End)),
            (KeyCode::Char('G'), KeyModifiers::SHIFT, nav(NavCommand::End)),
            (KeyCode::Char('m'), KeyModifiers::NONE, nav(NavCommand::ScrollToFraction(0.5))),
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit),
            (KeyCode::Esc, KeyModifiers::NONE, KeyAction::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit),
        ];

        let mut bindings: HashMap<KeyEvent, KeyAction> = entries
            .into_iter()
            .map(|(code, modifiers, action)| (KeyEvent::new(code, modifiers), action))
            .collect();

        // Digits jump proportionally: 0 = top, 9 = bottom.
        for digit in 0..=9u8 {
            bindings.insert(
                KeyEvent::new(KeyCode::Char((b'0' + digit) as char), KeyModifiers::NONE),
                nav(NavCommand::ScrollToFraction(f64::from(digit) / 9.0)),
            );
        }

        Self { bindings }
    }
}
