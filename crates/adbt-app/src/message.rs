//! Message types for the application (TEA pattern)

use std::sync::Arc;

use chrono::{DateTime, Local};

use adbt_bridge::{
    AppAction, AppPackage, DeviceAction, DeviceDetails, FileEntry, LogcatStream, SystemStats,
};
use adbt_core::Device;

use crate::input_key::InputKey;
use crate::overlay::{ConfirmOutcome, FormOutcome};
use crate::state::ScreenId;

/// All possible messages in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Terminal was resized
    Resize { width: u16, height: u16 },

    /// Tick event from the poll timeout
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    /// Replace the active screen with a fresh instance of this one
    SwitchScreen(ScreenId),

    /// The confirmation prompt was answered
    Confirm(ConfirmOutcome),

    /// The input form was submitted or cancelled
    Form(FormOutcome),

    /// A dispatched command finished. `epoch` is the screen generation the
    /// command was issued under.
    Completed { epoch: u64, event: Completion },
}

/// File operations that report back through [`Completion::FileActionFinished`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Delete,
    Pull,
}

impl FileAction {
    pub fn label(&self) -> &'static str {
        match self {
            FileAction::Delete => "Delete",
            FileAction::Pull => "Pull",
        }
    }
}

/// Results of dispatched work. Errors are already rendered to text.
#[derive(Debug, Clone)]
pub enum Completion {
    DevicesLoaded(Result<Vec<Device>, String>),

    /// `adb pair` output on success
    PairFinished(Result<String, String>),

    AppsLoaded(Result<Vec<AppPackage>, String>),

    AppActionFinished {
        action: AppAction,
        result: Result<(), String>,
    },

    FilesLoaded {
        /// Directory that was listed
        path: String,
        result: Result<Vec<FileEntry>, String>,
    },

    FileActionFinished {
        action: FileAction,
        result: Result<(), String>,
    },

    LogcatStarted(Result<Arc<LogcatStream>, String>),

    /// One pull of the logcat chain. `Ok(None)` is end of stream.
    LogcatPulled {
        pull: u64,
        result: Result<Option<Vec<String>>, String>,
    },

    DetailsLoaded(DeviceDetails),

    /// On success carries the label of what was done
    DeviceActionFinished {
        action: DeviceAction,
        result: Result<String, String>,
    },

    StatsSampled {
        at: DateTime<Local>,
        result: Result<SystemStats, String>,
    },

    /// Monitor sampling timer fired
    MonitorTick,

    /// A toast's display time elapsed
    ToastExpired { token: u64 },
}
