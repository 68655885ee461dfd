//! Command dispatch: every [`Command`] runs as its own tokio task and reports
//! back as at most one [`Message::Completed`]

use std::sync::Arc;

use chrono::Local;
use tokio::sync::mpsc;

use adbt_bridge::{
    delete_path, fetch_details, list_devices, list_dir, list_packages, pair, pull_file,
    run_app_action, run_device_action, sample_stats, DeviceBridge, Pulled,
};
use adbt_core::prelude::*;

use crate::command::Command;
use crate::message::{Completion, FileAction, Message};

/// Launches commands off the event loop.
///
/// Dispatch never blocks and never fails. Units of a batch run concurrently
/// with no ordering between their completions.
pub struct Dispatcher<B> {
    bridge: Arc<B>,
    msg_tx: mpsc::Sender<Message>,
}

impl<B> Clone for Dispatcher<B> {
    fn clone(&self) -> Self {
        Self {
            bridge: self.bridge.clone(),
            msg_tx: self.msg_tx.clone(),
        }
    }
}

impl<B: DeviceBridge + Send + Sync + 'static> Dispatcher<B> {
    pub fn new(bridge: Arc<B>, msg_tx: mpsc::Sender<Message>) -> Self {
        Self { bridge, msg_tx }
    }

    /// Spawn every unit of `command`; completions carry `epoch`
    pub fn dispatch(&self, epoch: u64, command: Command) {
        for unit in command.into_leaves() {
            let bridge = self.bridge.clone();
            let msg_tx = self.msg_tx.clone();
            tokio::spawn(async move {
                let Some(event) = run_command(bridge.as_ref(), unit).await else {
                    return;
                };
                if msg_tx.send(Message::Completed { epoch, event }).await.is_err() {
                    debug!("Event loop closed, dropping completion");
                }
            });
        }
    }
}

/// Run one unit to completion.
///
/// Errors become the error arm of the returned completion. `None` means the
/// unit declined to report (an interrupted or stopped log pull).
pub async fn run_command<B: DeviceBridge + Sync + ?Sized>(
    bridge: &B,
    command: Command,
) -> Option<Completion> {
    let completion = match command {
        Command::Batch(commands) => {
            warn!("Nested batch of {} reached run_command", commands.len());
            return None;
        }

        Command::ListDevices => {
            Completion::DevicesLoaded(list_devices(bridge).await.map_err(|e| e.to_string()))
        }

        Command::Pair { address, port, pin } => Completion::PairFinished(
            pair(bridge, &address, &port, &pin)
                .await
                .map_err(|e| e.to_string()),
        ),

        Command::ListApps { serial } => Completion::AppsLoaded(
            list_packages(bridge, &serial)
                .await
                .map_err(|e| e.to_string()),
        ),

        Command::AppAction {
            serial,
            package,
            action,
        } => Completion::AppActionFinished {
            action,
            result: run_app_action(bridge, &serial, &package, action)
                .await
                .map_err(|e| e.to_string()),
        },

        Command::ListFiles { serial, path } => {
            let result = list_dir(bridge, &serial, &path)
                .await
                .map_err(|e| e.to_string());
            Completion::FilesLoaded { path, result }
        }

        Command::DeletePath { serial, path } => Completion::FileActionFinished {
            action: FileAction::Delete,
            result: delete_path(bridge, &serial, &path)
                .await
                .map_err(|e| e.to_string()),
        },

        Command::PullFile {
            serial,
            remote,
            local,
        } => {
            let result: Result<()> = async {
                if let Some(dir) = local.parent() {
                    tokio::fs::create_dir_all(dir).await?;
                }
                pull_file(bridge, &serial, &remote, &local.to_string_lossy()).await
            }
            .await;
            Completion::FileActionFinished {
                action: FileAction::Pull,
                result: result.map_err(|e| e.to_string()),
            }
        }

        Command::StartLogcat { serial } => Completion::LogcatStarted(
            bridge
                .spawn_logcat(&serial)
                .await
                .map(Arc::new)
                .map_err(|e| e.to_string()),
        ),

        Command::PullLogLines {
            stream,
            pull,
            generation,
        } => {
            let result = match stream.next_lines(generation).await {
                Ok(Pulled::Lines(lines)) => Ok(Some(lines)),
                Ok(Pulled::Eof) => Ok(None),
                Ok(Pulled::Interrupted) | Ok(Pulled::Stopped) => return None,
                Err(e) => Err(e.to_string()),
            };
            Completion::LogcatPulled { pull, result }
        }

        Command::FetchDetails { serial } => {
            Completion::DetailsLoaded(fetch_details(bridge, &serial).await)
        }

        Command::DeviceAction { serial, action } => Completion::DeviceActionFinished {
            action,
            result: run_device_action(bridge, &serial, action)
                .await
                .map_err(|e| e.to_string()),
        },

        Command::SampleStats { serial } => {
            let result = sample_stats(bridge, &serial)
                .await
                .map_err(|e| e.to_string());
            Completion::StatsSampled {
                at: Local::now(),
                result,
            }
        }

        Command::After { delay, event } => {
            tokio::time::sleep(delay).await;
            event
        }
    };
    Some(completion)
}
