//! Multi-field text input form.
//!
//! Focus moves with tab/down and shift-tab/up and clamps at both ends.
//! Letters such as `j`/`k` are text, not navigation.

use crate::input_key::InputKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Field values in declaration order
    Submit(Vec<String>),
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct InputForm {
    visible: bool,
    title: String,
    fields: Vec<FormField>,
    focus: usize,
}

impl InputForm {
    pub fn show(&mut self, title: impl Into<String>, labels: &[&str]) {
        self.visible = true;
        self.title = title.into();
        self.fields = labels
            .iter()
            .map(|label| FormField {
                label: label.to_string(),
                value: String::new(),
            })
            .collect();
        self.focus = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.title.clear();
        self.fields.clear();
        self.focus = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    fn values(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.value.clone()).collect()
    }

    pub fn handle_key(&mut self, key: InputKey) -> Option<FormOutcome> {
        if !self.visible || self.fields.is_empty() {
            return None;
        }
        let last = self.fields.len() - 1;

        match key {
            InputKey::Tab | InputKey::Down => self.focus = (self.focus + 1).min(last),
            InputKey::BackTab | InputKey::Up => self.focus = self.focus.saturating_sub(1),
            InputKey::Enter => return Some(FormOutcome::Submit(self.values())),
            InputKey::Esc => return Some(FormOutcome::Cancel),
            InputKey::Backspace => {
                self.fields[self.focus].value.pop();
            }
            other => {
                if let Some(c) = other.typed_char() {
                    self.fields[self.focus].value.push(c);
                }
            }
        }
        None
    }
}
