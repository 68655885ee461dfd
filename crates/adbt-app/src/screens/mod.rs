//! The seven mutually exclusive screens
//!
//! Each screen implements [`ScreenController`]. [`Screen`] is the tagged
//! variant the root controller owns and the renderer matches on; it is built
//! fresh by [`Screen::create`] on every switch.

pub mod apps;
pub mod dashboard;
pub mod device_info;
pub mod devices;
pub mod files;
pub mod logcat;
pub mod monitor;

use crate::command::Command;
use crate::handler::UpdateResult;
use crate::input_key::InputKey;
use crate::message::Completion;
use crate::overlay::{ConfirmOutcome, FormOutcome};
use crate::state::{AppContext, ScreenId};
use crate::toast::Toast;

pub use apps::{AppFilter, AppsScreen};
pub use dashboard::{DashboardScreen, MenuItem, MENU};
pub use device_info::DeviceInfoScreen;
pub use devices::DevicesScreen;
pub use files::FilesScreen;
pub use logcat::{LogBuffer, LogLine, LogSession, LogcatScreen, StreamState};
pub use monitor::MonitorScreen;

/// Capabilities every screen provides to the root controller
pub trait ScreenController {
    fn id(&self) -> ScreenId;

    /// Called exactly once, right after construction
    fn init(&mut self, ctx: &mut AppContext) -> Option<Command>;

    /// `None` declines the key; the root then applies its fallback for `esc`
    fn handle_key(&mut self, ctx: &mut AppContext, key: InputKey) -> Option<UpdateResult>;

    fn handle_completion(&mut self, ctx: &mut AppContext, event: Completion) -> UpdateResult;

    fn handle_confirm(&mut self, _ctx: &mut AppContext, _outcome: ConfirmOutcome) -> UpdateResult {
        UpdateResult::none()
    }

    fn handle_form(&mut self, _ctx: &mut AppContext, _outcome: FormOutcome) -> UpdateResult {
        UpdateResult::none()
    }

    /// Release anything that outlives the screen (the logcat process)
    fn teardown(&mut self) {}

    /// True while an open form or search prompt takes printable keys
    fn captures_text(&self) -> bool {
        false
    }

    fn toast(&self) -> &Toast;

    fn toast_mut(&mut self) -> &mut Toast;
}

#[derive(Debug)]
pub enum Screen {
    Devices(DevicesScreen),
    Dashboard(DashboardScreen),
    Apps(AppsScreen),
    Files(FilesScreen),
    Logcat(LogcatScreen),
    DeviceInfo(DeviceInfoScreen),
    Monitor(MonitorScreen),
}

impl Screen {
    /// Factory keyed by screen identity
    pub fn create(id: ScreenId, ctx: &AppContext) -> Self {
        match id {
            ScreenId::Devices => Screen::Devices(DevicesScreen::new()),
            ScreenId::Dashboard => Screen::Dashboard(DashboardScreen::new()),
            ScreenId::Apps => Screen::Apps(AppsScreen::new()),
            ScreenId::Files => Screen::Files(FilesScreen::new(ctx)),
            ScreenId::Logcat => Screen::Logcat(LogcatScreen::new(ctx)),
            ScreenId::DeviceInfo => Screen::DeviceInfo(DeviceInfoScreen::new()),
            ScreenId::Monitor => Screen::Monitor(MonitorScreen::new()),
        }
    }

    pub fn controller(&self) -> &dyn ScreenController {
        match self {
            Screen::Devices(s) => s,
            Screen::Dashboard(s) => s,
            Screen::Apps(s) => s,
            Screen::Files(s) => s,
            Screen::Logcat(s) => s,
            Screen::DeviceInfo(s) => s,
            Screen::Monitor(s) => s,
        }
    }

    pub fn controller_mut(&mut self) -> &mut dyn ScreenController {
        match self {
            Screen::Devices(s) => s,
            Screen::Dashboard(s) => s,
            Screen::Apps(s) => s,
            Screen::Files(s) => s,
            Screen::Logcat(s) => s,
            Screen::DeviceInfo(s) => s,
            Screen::Monitor(s) => s,
        }
    }

    pub fn id(&self) -> ScreenId {
        self.controller().id()
    }

    pub fn captures_text(&self) -> bool {
        self.controller().captures_text()
    }

    pub fn teardown(&mut self) {
        self.controller_mut().teardown();
    }

    pub fn toast(&self) -> &Toast {
        self.controller().toast()
    }

    /// Toast expiry is the same for every screen; everything else is the
    /// screen's own business
    pub fn handle_completion(&mut self, ctx: &mut AppContext, event: Completion) -> UpdateResult {
        match event {
            Completion::ToastExpired { token } => {
                self.controller_mut()
                    .toast_mut()
                    .expire(token, ctx.settings.ui.toast_expiry);
                UpdateResult::none()
            }
            event => self.controller_mut().handle_completion(ctx, event),
        }
    }
}

/// Show a toast with the configured duration and return its expiry timer
pub(crate) fn notify(
    toast: &mut Toast,
    ctx: &AppContext,
    text: impl Into<String>,
    is_error: bool,
) -> Command {
    toast.show(text, is_error, ctx.settings.ui.toast_duration(is_error))
}

/// Move a list cursor one step, clamped to `len`
pub(crate) fn step_cursor(cursor: usize, key: InputKey, len: usize) -> usize {
    if key.is_up() {
        cursor.saturating_sub(1)
    } else if key.is_down() && cursor + 1 < len {
        cursor + 1
    } else {
        cursor
    }
}

/// Keep a cursor inside a list that may have shrunk
pub(crate) fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_matches_id() {
        let ctx = AppContext::default();
        for id in [
            ScreenId::Devices,
            ScreenId::Dashboard,
            ScreenId::Apps,
            ScreenId::Files,
            ScreenId::Logcat,
            ScreenId::DeviceInfo,
            ScreenId::Monitor,
        ] {
            assert_eq!(Screen::create(id, &ctx).id(), id);
        }
    }

    #[test]
    fn test_step_cursor_clamps() {
        assert_eq!(step_cursor(0, InputKey::Up, 3), 0);
        assert_eq!(step_cursor(0, InputKey::Char('j'), 3), 1);
        assert_eq!(step_cursor(2, InputKey::Down, 3), 2);
        assert_eq!(step_cursor(0, InputKey::Down, 0), 0);
    }

    #[test]
    fn test_clamp_cursor() {
        assert_eq!(clamp_cursor(5, 3), 2);
        assert_eq!(clamp_cursor(5, 0), 0);
        assert_eq!(clamp_cursor(1, 3), 1);
    }
}
