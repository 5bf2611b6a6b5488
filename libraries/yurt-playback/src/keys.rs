//! Keyboard shortcuts
//!
//! One key toggles play/pause, another advances to the next track. Keys are
//! ignored while focus is in a text input so typing never drives playback.

use crate::events::UserCommand;
use serde::{Deserialize, Serialize};

/// Where keyboard focus currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputFocus {
    /// Nothing editable focused
    #[default]
    Document,

    /// A text field has focus
    TextInput,
}

/// Key-to-command mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Play/pause (default: space)
    pub toggle: char,

    /// Next track (default: `n`)
    pub advance: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle: ' ',
            advance: 'n',
        }
    }
}

impl KeyBindings {
    /// Command bound to `key`, if any
    ///
    /// Letter keys match regardless of case.
    pub fn translate(&self, key: char, focus: InputFocus) -> Option<UserCommand> {
        if focus == InputFocus::TextInput {
            return None;
        }

        if key.eq_ignore_ascii_case(&self.toggle) {
            Some(UserCommand::TogglePlay)
        } else if key.eq_ignore_ascii_case(&self.advance) {
            Some(UserCommand::Next)
        } else {
            None
        }
    }
}
