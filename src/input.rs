//! Input handling module
//!
//! Text input dialog state for the generate flow (output folder prompt).

use crossterm::event::{KeyCode, KeyEvent};

/// Outcome of feeding a key event to a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// User confirmed with the final value
    Confirm(String),
    /// User cancelled the dialog
    Cancel,
    /// Dialog consumed the event, stay open
    Continue,
}

/// A single-line text input dialog
#[derive(Debug, Clone)]
pub struct InputDialog {
    /// Title of the dialog
    pub title: String,
    /// Instructions for the user
    pub instructions: String,
    /// Current text value
    pub value: String,
}

impl InputDialog {
    /// Create a new input dialog with an initial value
    pub fn new(
        title: impl Into<String>,
        instructions: impl Into<String>,
        initial: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            instructions: instructions.into(),
            value: initial.into(),
        }
    }

    /// Handle keyboard input for the dialog
    pub fn handle_input(&mut self, key_event: KeyEvent) -> InputResult {
        match key_event.code {
            KeyCode::Enter => InputResult::Confirm(self.value.clone()),
            KeyCode::Esc => InputResult::Cancel,
            KeyCode::Backspace => {
                self.value.pop();
                InputResult::Continue
            }
            KeyCode::Char(c) => {
                self.value.push(c);
                InputResult::Continue
            }
            _ => InputResult::Continue,
        }
    }
}
