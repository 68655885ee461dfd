//! Global key bindings, checked before the active screen sees a key

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, ScreenId};

use super::UpdateResult;

/// Route a key press.
///
/// `ctrl+c` always quits. `q` quits unless the screen is capturing text.
/// Everything else goes to the screen; an `esc` the screen declines returns
/// to the dashboard.
pub fn handle_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    match key {
        InputKey::CharCtrl('c') => return UpdateResult::message(Message::Quit),
        // Deliberately not an unconditional quit: while a form field or the
        // logcat search has focus `q` is typed, and `ctrl+c` remains the exit.
        InputKey::Char('q') if !state.screen.captures_text() => {
            return UpdateResult::message(Message::Quit)
        }
        _ => {}
    }

    let AppState { ctx, screen, .. } = state;
    match screen.controller_mut().handle_key(ctx, key) {
        Some(result) => result,
        None if key == InputKey::Esc && screen.id() != ScreenId::Dashboard => {
            UpdateResult::message(Message::SwitchScreen(ScreenId::Dashboard))
        }
        None => UpdateResult::none(),
    }
}
