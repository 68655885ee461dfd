//! OS signal handling
//!
//! SIGINT/SIGTERM become [`Message::Quit`] so the run loop tears the active
//! screen down (stopping any logcat child) before the terminal is restored.

use tokio::sync::mpsc;

use adbt_core::prelude::*;

use crate::message::Message;

/// Spawn a task that turns the first termination signal into a quit message
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match shutdown_signal().await {
            Ok(name) => {
                info!("{} received, quitting", name);
                if tx.send(Message::Quit).await.is_err() {
                    debug!("run loop already gone");
                }
            }
            Err(e) => error!("Signal handler error: {}", e),
        }
    });
}

/// Resolve with the name of whichever signal arrived first
async fn shutdown_signal() -> Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())
            .map_err(|e| Error::terminal(format!("SIGINT handler: {}", e)))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| Error::terminal(format!("SIGTERM handler: {}", e)))?;

        let name = tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        };
        Ok(name)
    }

    #[cfg(windows)]
    {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| Error::terminal(format!("Ctrl+C handler: {}", e)))?;
        Ok("Ctrl+C")
    }
}
