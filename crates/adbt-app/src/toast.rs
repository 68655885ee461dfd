//! Transient notifications
//!
//! A toast is a projection over time: [`Toast::show`] overwrites the current
//! text immediately and hands back the timer that will hide it. Toasts never
//! queue.

use std::time::Duration;

use crate::command::Command;
use crate::config::ToastExpiry;
use crate::message::Completion;

#[derive(Debug, Clone, Default)]
pub struct Toast {
    visible: bool,
    text: String,
    is_error: bool,
    /// Token of the most recent `show`
    token: u64,
}

impl Toast {
    /// Show `text`, returning the one-shot expiry timer for it
    pub fn show(&mut self, text: impl Into<String>, is_error: bool, duration: Duration) -> Command {
        self.token += 1;
        self.visible = true;
        self.text = text.into();
        self.is_error = is_error;
        Command::After {
            delay: duration,
            event: Completion::ToastExpired { token: self.token },
        }
    }

    /// Apply an expiry timer. Returns whether the toast was hidden.
    ///
    /// Under [`ToastExpiry::Any`] a timer left over from a superseded toast
    /// still hides the current one.
    pub fn expire(&mut self, token: u64, policy: ToastExpiry) -> bool {
        let applies = match policy {
            ToastExpiry::Any => true,
            ToastExpiry::Latest => token == self.token,
        };
        if applies {
            self.visible = false;
        }
        applies
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}
