//! Yes/no confirmation prompt state.
//!
//! The rendering widget lives in `adbt-tui`.

use crate::input_key::InputKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Yes,
    No,
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmPrompt {
    visible: bool,
    message: String,
}

impl ConfirmPrompt {
    pub fn show(&mut self, message: impl Into<String>) {
        self.visible = true;
        self.message = message.into();
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.message.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Only `y`/`enter` and `n`/`esc` resolve; every other key is swallowed.
    pub fn handle_key(&mut self, key: InputKey) -> Option<ConfirmOutcome> {
        if !self.visible {
            return None;
        }
        match key {
            InputKey::Char('y') | InputKey::Char('Y') | InputKey::Enter => {
                Some(ConfirmOutcome::Yes)
            }
            InputKey::Char('n') | InputKey::Char('N') | InputKey::Esc => Some(ConfirmOutcome::No),
            _ => None,
        }
    }
}
