//! Inline search prompt shared by the app list and log viewer

use crate::input_key::InputKey;

#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    active: bool,
    query: String,
}

impl SearchInput {
    /// Begin typing a fresh query
    pub fn start(&mut self) {
        self.active = true;
        self.query.clear();
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.query.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Case-insensitive substring match; an empty query matches everything
    pub fn matches(&self, text: &str) -> bool {
        self.query.is_empty() || text.to_lowercase().contains(&self.query.to_lowercase())
    }

    /// Edit the query while active. `esc` clears, `enter` keeps it.
    /// Returns whether the query changed.
    pub fn handle_key(&mut self, key: InputKey) -> bool {
        match key {
            InputKey::Esc => {
                let changed = !self.query.is_empty();
                self.clear();
                changed
            }
            InputKey::Enter => {
                self.active = false;
                false
            }
            InputKey::Backspace => self.query.pop().is_some(),
            other => match other.typed_char() {
                Some(c) => {
                    self.query.push(c);
                    true
                }
                None => false,
            },
        }
    }
}
