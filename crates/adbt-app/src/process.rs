//! Message processing
//!
//! Runs one message through the TEA update loop, following any follow-up
//! messages, and hands commands to the dispatcher stamped with the epoch
//! current after the update.

use adbt_bridge::DeviceBridge;

use crate::actions::Dispatcher;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<B>(state: &mut AppState, message: Message, dispatcher: &Dispatcher<B>)
where
    B: DeviceBridge + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);
        if let Some(command) = result.command {
            dispatcher.dispatch(state.epoch, command);
        }
        msg = result.message;
    }
}
