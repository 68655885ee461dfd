//! Main update function - handles state transitions (TEA pattern)

use adbt_core::prelude::*;

use crate::message::Message;
use crate::screens::Screen;
use crate::state::{AppState, ScreenId};

use super::{keys::handle_key, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or command
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.screen.teardown();
            state.quit();
            UpdateResult::none()
        }

        Message::Resize { width, height } => {
            state.ctx.width = width;
            state.ctx.height = height;
            UpdateResult::none()
        }

        // Redraw only
        Message::Tick => UpdateResult::none(),

        Message::SwitchScreen(id) => switch_screen(state, id),

        Message::Key(key) => handle_key(state, key),

        Message::Confirm(outcome) => {
            let AppState { ctx, screen, .. } = state;
            screen.controller_mut().handle_confirm(ctx, outcome)
        }

        Message::Form(outcome) => {
            let AppState { ctx, screen, .. } = state;
            screen.controller_mut().handle_form(ctx, outcome)
        }

        Message::Completed { epoch, event } => {
            if epoch != state.epoch {
                debug!(
                    "Dropping stale completion from epoch {} (current {}): {:?}",
                    epoch, state.epoch, event
                );
                return UpdateResult::none();
            }
            let AppState { ctx, screen, .. } = state;
            screen.handle_completion(ctx, event)
        }
    }
}

/// Tear down the active screen, open a fresh `id` and run its initializer
fn switch_screen(state: &mut AppState, id: ScreenId) -> UpdateResult {
    state.screen.teardown();
    state.epoch += 1;
    state.screen = Screen::create(id, &state.ctx);
    info!("Switched to {} (epoch {})", id, state.epoch);

    let AppState { ctx, screen, .. } = state;
    UpdateResult::maybe(screen.controller_mut().init(ctx))
}
