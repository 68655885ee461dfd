//! Device details and device-level controls

use adbt_bridge::{DeviceAction, DeviceDetails};
use adbt_core::prelude::*;

use crate::command::Command;
use crate::handler::UpdateResult;
use crate::input_key::InputKey;
use crate::message::{Completion, Message};
use crate::overlay::{ConfirmOutcome, ConfirmPrompt};
use crate::state::{AppContext, ScreenId};
use crate::toast::Toast;

use super::{notify, step_cursor, ScreenController};

#[derive(Debug, Default)]
pub struct DeviceInfoScreen {
    /// `None` until the first round of queries completes
    pub details: Option<DeviceDetails>,
    /// Index into [`DeviceAction::ALL`]
    pub cursor: usize,
    pub confirm: ConfirmPrompt,
    pub toast: Toast,
    pending: Option<DeviceAction>,
}

impl DeviceInfoScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.details.is_none()
    }

    fn fetch(&self, ctx: &AppContext) -> Option<Command> {
        let serial = ctx.serial()?.to_string();
        Some(Command::FetchDetails { serial })
    }

    fn run(&self, ctx: &AppContext, action: DeviceAction) -> Option<Command> {
        let serial = ctx.serial()?.to_string();
        Some(Command::DeviceAction { serial, action })
    }

    fn request(&mut self, ctx: &mut AppContext, action: DeviceAction) -> UpdateResult {
        if action == DeviceAction::Mirror {
            if let Some(missing) = ctx.tools.mirror_unavailable_message() {
                return UpdateResult::command(notify(&mut self.toast, ctx, missing, true));
            }
        }

        if action.is_destructive() && ctx.settings.behavior.confirm_destructive {
            self.confirm.show(format!("{}?", action.label()));
            self.pending = Some(action);
            return UpdateResult::none();
        }

        UpdateResult::maybe(self.run(ctx, action))
    }
}

impl ScreenController for DeviceInfoScreen {
    fn id(&self) -> ScreenId {
        ScreenId::DeviceInfo
    }

    fn init(&mut self, ctx: &mut AppContext) -> Option<Command> {
        self.fetch(ctx)
    }

    fn handle_key(&mut self, ctx: &mut AppContext, key: InputKey) -> Option<UpdateResult> {
        if self.confirm.is_visible() {
            let result = match self.confirm.handle_key(key) {
                Some(outcome) => UpdateResult::message(Message::Confirm(outcome)),
                None => UpdateResult::none(),
            };
            return Some(result);
        }

        if !ctx.has_device() {
            return None;
        }

        match key {
            k if k.is_up() || k.is_down() => {
                self.cursor = step_cursor(self.cursor, k, DeviceAction::ALL.len());
                Some(UpdateResult::none())
            }
            InputKey::Enter => {
                let action = DeviceAction::ALL[self.cursor];
                Some(self.request(ctx, action))
            }
            InputKey::Char(c) => {
                let action = DeviceAction::from_key(c)?;
                Some(self.request(ctx, action))
            }
            _ => None,
        }
    }

    fn handle_confirm(&mut self, ctx: &mut AppContext, outcome: ConfirmOutcome) -> UpdateResult {
        self.confirm.hide();
        match (outcome, self.pending.take()) {
            (ConfirmOutcome::Yes, Some(action)) => UpdateResult::maybe(self.run(ctx, action)),
            _ => UpdateResult::none(),
        }
    }

    fn handle_completion(&mut self, ctx: &mut AppContext, event: Completion) -> UpdateResult {
        match event {
            Completion::DetailsLoaded(details) => {
                self.details = Some(details);
                UpdateResult::none()
            }
            Completion::DeviceActionFinished { action, result } => match result {
                Ok(label) => {
                    let text = format!("{} executed successfully", label);
                    let toast = notify(&mut self.toast, ctx, text, false);
                    // The address shown may have changed
                    let refresh = if action == DeviceAction::ToggleWifi {
                        self.fetch(ctx)
                    } else {
                        None
                    };
                    UpdateResult::maybe(Command::batch([Some(toast), refresh]))
                }
                Err(e) => {
                    warn!("{} failed: {}", action, e);
                    let text = format!("{} failed: {}", action.label(), e);
                    UpdateResult::command(notify(&mut self.toast, ctx, text, true))
                }
            },
            _ => UpdateResult::none(),
        }
    }

    fn toast(&self) -> &Toast {
        &self.toast
    }

    fn toast_mut(&mut self) -> &mut Toast {
        &mut self.toast
    }
}
