//! Dashboard: the initial screen and menu into every other screen

use adbt_core::prelude::*;

use crate::command::Command;
use crate::handler::UpdateResult;
use crate::input_key::InputKey;
use crate::message::{Completion, Message};
use crate::state::{AppContext, ScreenId};
use crate::toast::Toast;

use super::{notify, step_cursor, ScreenController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub key: char,
    pub target: ScreenId,
    pub description: &'static str,
}

impl MenuItem {
    pub fn title(&self) -> &'static str {
        match self.target {
            ScreenId::Devices => "Devices",
            other => other.title(),
        }
    }
}

pub const MENU: [MenuItem; 6] = [
    MenuItem {
        key: 'd',
        target: ScreenId::Devices,
        description: "View and select connected devices",
    },
    MenuItem {
        key: 'i',
        target: ScreenId::DeviceInfo,
        description: "View device details and controls",
    },
    MenuItem {
        key: 'l',
        target: ScreenId::Logcat,
        description: "View live device logs",
    },
    MenuItem {
        key: 'a',
        target: ScreenId::Apps,
        description: "Manage installed applications",
    },
    MenuItem {
        key: 'f',
        target: ScreenId::Files,
        description: "Browse device file system",
    },
    MenuItem {
        key: 'm',
        target: ScreenId::Monitor,
        description: "Performance stats (CPU, RAM, Net)",
    },
];

#[derive(Debug, Default)]
pub struct DashboardScreen {
    pub cursor: usize,
    pub loading: bool,
    pub toast: Toast,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device-bound targets redirect to device selection when nothing is
    /// selected
    fn open(&self, ctx: &AppContext, target: ScreenId) -> UpdateResult {
        let target = if target.requires_device() && !ctx.has_device() {
            debug!("No device selected, redirecting {} to device selection", target);
            ScreenId::Devices
        } else {
            target
        };
        UpdateResult::message(Message::SwitchScreen(target))
    }

    fn refresh(&mut self) -> Command {
        self.loading = true;
        Command::ListDevices
    }
}

impl ScreenController for DashboardScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Dashboard
    }

    fn init(&mut self, _ctx: &mut AppContext) -> Option<Command> {
        Some(self.refresh())
    }

    fn handle_key(&mut self, ctx: &mut AppContext, key: InputKey) -> Option<UpdateResult> {
        match key {
            k if k.is_up() || k.is_down() => {
                self.cursor = step_cursor(self.cursor, k, MENU.len());
                Some(UpdateResult::none())
            }
            InputKey::Enter => Some(self.open(ctx, MENU[self.cursor].target)),
            InputKey::Char('r') => Some(UpdateResult::command(self.refresh())),
            InputKey::Char(c) => {
                let item = MENU.iter().find(|item| item.key == c)?;
                Some(self.open(ctx, item.target))
            }
            _ => None,
        }
    }

    fn handle_completion(&mut self, ctx: &mut AppContext, event: Completion) -> UpdateResult {
        match event {
            Completion::DevicesLoaded(Ok(devices)) => {
                self.loading = false;
                ctx.set_devices(devices);
                if ctx.settings.behavior.auto_select_single {
                    ctx.auto_select_single();
                }
                UpdateResult::none()
            }
            Completion::DevicesLoaded(Err(e)) => {
                self.loading = false;
                warn!("Device refresh failed: {}", e);
                let text = match ctx.tools.adb_unavailable_message() {
                    Some(missing) => missing.to_string(),
                    None => format!("Failed to load devices: {}", e),
                };
                UpdateResult::command(notify(&mut self.toast, ctx, text, true))
            }
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
