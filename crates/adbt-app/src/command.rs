//! Deferred units of work
//!
//! Handlers never touch the bridge. They return a [`Command`] and the
//! [`Dispatcher`](crate::actions::Dispatcher) runs it off the event loop,
//! delivering at most one [`Completion`] back.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use adbt_bridge::{AppAction, DeviceAction, LogcatStream};

use crate::message::Completion;

#[derive(Debug, Clone)]
pub enum Command {
    /// Fire independent commands without serializing them
    Batch(Vec<Command>),

    ListDevices,

    Pair {
        address: String,
        port: String,
        pin: String,
    },

    ListApps {
        serial: String,
    },

    AppAction {
        serial: String,
        package: String,
        action: AppAction,
    },

    ListFiles {
        serial: String,
        path: String,
    },

    DeletePath {
        serial: String,
        path: String,
    },

    PullFile {
        serial: String,
        remote: String,
        local: PathBuf,
    },

    StartLogcat {
        serial: String,
    },

    /// Await the next batch of lines from a running stream. Yields nothing
    /// when the pull is interrupted or the stream was stopped.
    PullLogLines {
        stream: Arc<LogcatStream>,
        pull: u64,
        generation: u64,
    },

    FetchDetails {
        serial: String,
    },

    DeviceAction {
        serial: String,
        action: DeviceAction,
    },

    SampleStats {
        serial: String,
    },

    /// One-shot timer
    After {
        delay: Duration,
        event: Completion,
    },
}

impl Command {
    /// Combine optional commands, collapsing empty and single-element batches
    pub fn batch(commands: impl IntoIterator<Item = Option<Command>>) -> Option<Command> {
        let mut commands: Vec<Command> = commands.into_iter().flatten().collect();
        match commands.len() {
            0 => None,
            1 => commands.pop(),
            _ => Some(Command::Batch(commands)),
        }
    }

    /// Flatten nested batches into leaf commands
    pub fn into_leaves(self) -> Vec<Command> {
        match self {
            Command::Batch(commands) => commands.into_iter().flat_map(Command::into_leaves).collect(),
            other => vec![other],
        }
    }
}
