//! Device selection and wireless pairing

use adbt_core::prelude::*;

use crate::command::Command;
use crate::handler::UpdateResult;
use crate::input_key::InputKey;
use crate::message::{Completion, Message};
use crate::overlay::{FormOutcome, InputForm};
use crate::state::{AppContext, ScreenId};
use crate::toast::Toast;

use super::{clamp_cursor, notify, step_cursor, ScreenController};

pub const PAIR_FORM_TITLE: &str = "Pair Device Wirelessly";
pub const PAIR_FORM_FIELDS: [&str; 3] = ["IP Address", "Port", "PIN Code"];

#[derive(Debug, Default)]
pub struct DevicesScreen {
    pub cursor: usize,
    pub loading: bool,
    /// A pair command is in flight
    pub pairing: bool,
    pub form: InputForm,
    pub toast: Toast,
}

impl DevicesScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh(&mut self) -> Command {
        self.loading = true;
        Command::ListDevices
    }

    fn select(&mut self, ctx: &mut AppContext) -> UpdateResult {
        let Some(device) = ctx.devices.get(self.cursor).cloned() else {
            return UpdateResult::none();
        };
        if !device.is_connected() {
            let text = format!("{} is {}", device.display_name(), device.state);
            return UpdateResult::command(notify(&mut self.toast, ctx, text, true));
        }
        ctx.select_device(device);
        UpdateResult::message(Message::SwitchScreen(ScreenId::Dashboard))
    }
}

impl ScreenController for DevicesScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Devices
    }

    fn init(&mut self, _ctx: &mut AppContext) -> Option<Command> {
        Some(self.refresh())
    }

    fn handle_key(&mut self, ctx: &mut AppContext, key: InputKey) -> Option<UpdateResult> {
        if self.form.is_visible() {
            let result = match self.form.handle_key(key) {
                Some(outcome) => UpdateResult::message(Message::Form(outcome)),
                None => UpdateResult::none(),
            };
            return Some(result);
        }

        match key {
            k if k.is_up() || k.is_down() => {
                self.cursor = step_cursor(self.cursor, k, ctx.devices.len());
                let height = ctx.body_height();
                ctx.viewport_mut(ScreenId::Devices).ensure_visible(self.cursor, height);
                Some(UpdateResult::none())
            }
            InputKey::Enter => Some(self.select(ctx)),
            InputKey::Char('r') => Some(UpdateResult::command(self.refresh())),
            InputKey::Char('w') => {
                self.form.show(PAIR_FORM_TITLE, &PAIR_FORM_FIELDS);
                Some(UpdateResult::none())
            }
            _ => None,
        }
    }

    fn handle_form(&mut self, ctx: &mut AppContext, outcome: FormOutcome) -> UpdateResult {
        self.form.hide();
        let FormOutcome::Submit(values) = outcome else {
            return UpdateResult::none();
        };
        let [address, port, pin]: [String; 3] = match values.try_into() {
            Ok(fields) => fields,
            Err(values) => {
                warn!("Pair form returned {} fields", values.len());
                return UpdateResult::none();
            }
        };

        self.pairing = true;
        let toast = notify(&mut self.toast, ctx, "Connecting to device…", false);
        UpdateResult::maybe(Command::batch([
            Some(toast),
            Some(Command::Pair { address, port, pin }),
        ]))
    }

    fn handle_completion(&mut self, ctx: &mut AppContext, event: Completion) -> UpdateResult {
        match event {
            Completion::DevicesLoaded(Ok(devices)) => {
                self.loading = false;
                ctx.set_devices(devices);
                self.cursor = clamp_cursor(self.cursor, ctx.devices.len());
                UpdateResult::none()
            }
            Completion::DevicesLoaded(Err(e)) => {
                self.loading = false;
                let text = match ctx.tools.adb_unavailable_message() {
                    Some(missing) => missing.to_string(),
                    None => format!("Failed to load devices: {}", e),
                };
                UpdateResult::command(notify(&mut self.toast, ctx, text, true))
            }
            Completion::PairFinished(Ok(output)) => {
                self.pairing = false;
                info!("Paired: {}", output);
                let toast = notify(&mut self.toast, ctx, "Device paired successfully", false);
                UpdateResult::maybe(Command::batch([Some(toast), Some(self.refresh())]))
            }
            Completion::PairFinished(Err(e)) => {
                self.pairing = false;
                let text = format!("Pairing failed: {}", e);
                UpdateResult::command(notify(&mut self.toast, ctx, text, true))
            }
            _ => UpdateResult::none(),
        }
    }

    fn captures_text(&self) -> bool {
        self.form.is_visible()
    }

    fn toast(&self) -> &Toast {
        &self.toast
    }

    fn toast_mut(&mut self) -> &mut Toast {
        &mut self.toast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbt_bridge::test_utils::{test_device, test_device_in_state};
    use adbt_core::DeviceState;

    fn type_text(screen: &mut DevicesScreen, ctx: &mut AppContext, text: &str) {
        for c in text.chars() {
            screen.handle_key(ctx, InputKey::Char(c));
        }
    }

    fn leaves(result: UpdateResult) -> Vec<Command> {
        result.command.map(Command::into_leaves).unwrap_or_default()
    }

    #[test]
    fn test_enter_selects_and_returns_to_dashboard() {
        let mut ctx = AppContext::default();
        ctx.set_devices(vec![test_device("a", "A"), test_device("b", "B")]);
        let mut screen = DevicesScreen::new();

        screen.handle_key(&mut ctx, InputKey::Down);
        let result = screen.handle_key(&mut ctx, InputKey::Enter).unwrap();

        assert_eq!(ctx.serial(), Some("b"));
        assert!(matches!(
            result.message,
            Some(Message::SwitchScreen(ScreenId::Dashboard))
        ));
    }

    #[test]
    fn test_enter_on_unauthorized_device_toasts() {
        let mut ctx = AppContext::default();
        ctx.set_devices(vec![test_device_in_state("a", DeviceState::Unauthorized)]);
        let mut screen = DevicesScreen::new();

        let result = screen.handle_key(&mut ctx, InputKey::Enter).unwrap();

        assert!(!ctx.has_device());
        assert!(result.message.is_none());
        assert!(screen.toast.is_error());
    }

    #[test]
    fn test_refresh_clamps_cursor() {
        let mut ctx = AppContext::default();
        ctx.set_devices(vec![test_device("a", "A"), test_device("b", "B")]);
        let mut screen = DevicesScreen::new();
        screen.cursor = 1;

        screen.handle_completion(
            &mut ctx,
            Completion::DevicesLoaded(Ok(vec![test_device("a", "A")])),
        );

        assert_eq!(screen.cursor, 0);
    }

    #[test]
    fn test_pair_form_submits_pair_command() {
        let mut ctx = AppContext::default();
        let mut screen = DevicesScreen::new();

        screen.handle_key(&mut ctx, InputKey::Char('w'));
        assert!(screen.captures_text());

        type_text(&mut screen, &mut ctx, "192.168.1.5");
        screen.handle_key(&mut ctx, InputKey::Tab);
        type_text(&mut screen, &mut ctx, "37000");
        screen.handle_key(&mut ctx, InputKey::Tab);
        type_text(&mut screen, &mut ctx, "123456");

        let submitted = screen.handle_key(&mut ctx, InputKey::Enter).unwrap();
        let Some(Message::Form(outcome)) = submitted.message else {
            panic!("expected a form outcome");
        };

        let commands = leaves(screen.handle_form(&mut ctx, outcome));
        assert!(!screen.form.is_visible());
        assert!(screen.pairing);
        assert!(commands.iter().any(|c| matches!(
            c,
            Command::Pair { address, port, pin }
                if address == "192.168.1.5" && port == "37000" && pin == "123456"
        )));
    }

    #[test]
    fn test_form_cancel_hides_without_command() {
        let mut ctx = AppContext::default();
        let mut screen = DevicesScreen::new();
        screen.handle_key(&mut ctx, InputKey::Char('w'));

        let result = screen.handle_form(&mut ctx, FormOutcome::Cancel);

        assert!(!screen.form.is_visible());
        assert!(result.command.is_none());
    }

    #[test]
    fn test_pair_failure_toasts() {
        let mut ctx = AppContext::default();
        let mut screen = DevicesScreen::new();
        screen.handle_completion(
            &mut ctx,
            Completion::PairFinished(Err("wrong code".into())),
        );
        assert_eq!(screen.toast.text(), "Pairing failed: wrong code");
        assert!(screen.toast.is_error());
    }

    #[test]
    fn test_pair_success_refreshes() {
        let mut ctx = AppContext::default();
        let mut screen = DevicesScreen::new();
        let commands = leaves(screen.handle_completion(
            &mut ctx,
            Completion::PairFinished(Ok("Successfully paired".into())),
        ));
        assert!(commands.iter().any(|c| matches!(c, Command::ListDevices)));
        assert!(screen.loading);
    }

    #[test]
    fn test_esc_with_form_open_is_consumed() {
        let mut ctx = AppContext::default();
        let mut screen = DevicesScreen::new();
        screen.handle_key(&mut ctx, InputKey::Char('w'));
        let result = screen.handle_key(&mut ctx, InputKey::Esc);
        assert!(matches!(
            result,
            Some(UpdateResult {
                message: Some(Message::Form(FormOutcome::Cancel)),
                ..
            })
        ));
    }
}
