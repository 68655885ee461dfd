//! Handler module - TEA update function and the root controller
//!
//! Organized into submodules:
//! - `update`: Main update() function, screen switching and epoch filtering
//! - `keys`: Global key interception ahead of the active screen

pub(crate) mod keys;
pub(crate) mod update;


use crate::command::Command;
use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// What a single update produced
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional command for the dispatcher
    pub command: Option<Command>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            command: None,
        }
    }

    pub fn command(command: Command) -> Self {
        Self {
            message: None,
            command: Some(command),
        }
    }

    pub fn maybe(command: Option<Command>) -> Self {
        Self {
            message: None,
            command,
        }
    }
}
