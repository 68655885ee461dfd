//! Modal overlays
//!
//! While visible, an overlay consumes every key before the owning screen
//! sees it. Resolution comes back to the screen as a [`Message::Confirm`]
//! or [`Message::Form`](crate::message::Message::Form); the screen hides the
//! overlay and performs the side effect.
//!
//! [`Message::Confirm`]: crate::message::Message::Confirm

mod confirm;
mod form;
mod search;

pub use confirm::{ConfirmOutcome, ConfirmPrompt};
pub use form::{FormField, FormOutcome, InputForm};
pub use search::SearchInput;
