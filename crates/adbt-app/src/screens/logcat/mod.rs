//! Log viewer: a streaming session, its bounded buffer and the read-only
//! level/search projection over it

pub mod buffer;
pub mod session;

pub use buffer::{LogBuffer, LogLine};
pub use session::{LogSession, StreamState};

use adbt_core::prelude::*;
use adbt_core::LogPriority;

use crate::command::Command;
use crate::handler::UpdateResult;
use crate::input_key::InputKey;
use crate::message::Completion;
use crate::overlay::SearchInput;
use crate::state::{AppContext, ScreenId};
use crate::toast::Toast;

use super::{notify, ScreenController};

/// Threshold after `current` in the cycle All, V, D, I, W, E, F
pub fn next_level(current: Option<LogPriority>) -> Option<LogPriority> {
    match current {
        None => Some(LogPriority::ALL[0]),
        Some(level) => {
            let index = LogPriority::ALL.iter().position(|l| *l == level)?;
            LogPriority::ALL.get(index + 1).copied()
        }
    }
}

#[derive(Debug)]
pub struct LogcatScreen {
    pub session: LogSession,
    pub buffer: LogBuffer,
    /// `None` shows every level
    pub min_level: Option<LogPriority>,
    pub search: SearchInput,
    pub toast: Toast,
}

impl LogcatScreen {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            session: LogSession::new(),
            buffer: LogBuffer::new(ctx.settings.logcat.capacity()),
            min_level: None,
            search: SearchInput::default(),
            toast: Toast::default(),
        }
    }

    pub fn visible_lines(&self) -> Vec<&LogLine> {
        self.buffer.filtered(self.min_level, &self.search).collect()
    }

    /// `s`: pause or resume; a finished session is replaced by a fresh one
    fn toggle_stream(&mut self, ctx: &AppContext) -> Option<Command> {
        if self.session.state().is_terminal() {
            let serial = ctx.serial()?;
            self.session = LogSession::new();
            return self.session.start(serial);
        }
        self.session.toggle()
    }

    fn scroll(&mut self, ctx: &mut AppContext, key: InputKey) -> bool {
        let total = self.visible_lines().len();
        let height = ctx.body_height();
        let viewport = ctx.viewport_mut(ScreenId::Logcat);
        match key {
            k if k.is_up() => viewport.scroll_up(1, total, height),
            k if k.is_down() => viewport.scroll_down(1, total, height),
            InputKey::PageUp => viewport.scroll_up(height, total, height),
            InputKey::PageDown => viewport.scroll_down(height, total, height),
            InputKey::Home => viewport.to_top(),
            InputKey::End => viewport.to_bottom(),
            _ => return false,
        }
        true
    }

    fn stream_failed(&mut self, ctx: &AppContext, prefix: &str) -> Option<Command> {
        let cause = self.session.error().unwrap_or("unknown error");
        let text = format!("{}: {}", prefix, cause);
        Some(notify(&mut self.toast, ctx, text, true))
    }
}

impl ScreenController for LogcatScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Logcat
    }

    fn init(&mut self, ctx: &mut AppContext) -> Option<Command> {
        ctx.viewport_mut(ScreenId::Logcat).to_bottom();
        let serial = ctx.serial()?;
        self.session.start(serial)
    }

    fn handle_key(&mut self, ctx: &mut AppContext, key: InputKey) -> Option<UpdateResult> {
        if self.search.is_active() {
            self.search.handle_key(key);
            return Some(UpdateResult::none());
        }

        if !ctx.has_device() {
            return None;
        }

        if self.scroll(ctx, key) {
            return Some(UpdateResult::none());
        }

        let result = match key {
            InputKey::Char('s') => UpdateResult::maybe(self.toggle_stream(ctx)),
            InputKey::Char('c') => {
                self.buffer.clear();
                ctx.viewport_mut(ScreenId::Logcat).to_bottom();
                UpdateResult::none()
            }
            InputKey::Char('f') => {
                self.min_level = next_level(self.min_level);
                UpdateResult::none()
            }
            InputKey::Char('/') => {
                self.search.start();
                UpdateResult::none()
            }
            InputKey::Esc if !self.search.query().is_empty() => {
                self.search.clear();
                UpdateResult::none()
            }
            _ => return None,
        };
        Some(result)
    }

    fn handle_completion(&mut self, ctx: &mut AppContext, event: Completion) -> UpdateResult {
        match event {
            Completion::LogcatStarted(result) => {
                let next = self.session.on_started(result);
                if self.session.state() == StreamState::Errored {
                    return UpdateResult::maybe(self.stream_failed(ctx, "Failed to start logcat"));
                }
                UpdateResult::maybe(next)
            }
            Completion::LogcatPulled { pull, result } => {
                let before = self.session.state();
                let next = self.session.on_pulled(pull, result, &mut self.buffer);
                match self.session.state() {
                    StreamState::Errored if before != StreamState::Errored => {
                        UpdateResult::maybe(self.stream_failed(ctx, "Logcat stream error"))
                    }
                    StreamState::Stopped if before != StreamState::Stopped => {
                        UpdateResult::command(notify(
                            &mut self.toast,
                            ctx,
                            "Logcat stream ended",
                            false,
                        ))
                    }
                    _ => UpdateResult::maybe(next),
                }
            }
            _ => UpdateResult::none(),
        }
    }

    fn teardown(&mut self) {
        debug!("Tearing down logcat ({})", self.session.state().label());
        self.session.stop();
    }

    fn captures_text(&self) -> bool {
        self.search.is_active()
    }

    fn toast(&self) -> &Toast {
        &self.toast
    }

    fn toast_mut(&mut self) -> &mut Toast {
        &mut self.toast
    }
}
