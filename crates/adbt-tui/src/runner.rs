//! Main TUI runner - entry point and event loop
//!
//! Contains the application lifecycle:
//! - `run`: sets up the terminal, channels and dispatcher, then loops
//! - `run_loop`: drains completions, draws, and polls terminal events

use std::sync::Arc;

use tokio::sync::mpsc;

use adbt_app::config::Settings;
use adbt_app::{process_message, signals, AppState, Dispatcher, Message, ScreenId};
use adbt_bridge::{DeviceBridge, ToolAvailability};
use adbt_core::prelude::*;

use crate::{event, render, terminal};

/// Capacity of the shared message channel
const CHANNEL_CAPACITY: usize = 256;

/// Run the TUI against `bridge` until the user quits or a signal arrives.
///
/// `preferred_serial` is selected automatically once it shows up in a
/// device listing.
pub async fn run<B>(
    settings: Settings,
    tools: ToolAvailability,
    bridge: B,
    preferred_serial: Option<String>,
) -> Result<()>
where
    B: DeviceBridge + Send + Sync + 'static,
{
    terminal::install_panic_hook();
    let mut term = terminal::init()?;

    let mut state = AppState::new(settings, tools);
    state.ctx.preferred_serial = preferred_serial;
    info!(
        "adbt starting: adb={:?} mirror={:?}",
        state.ctx.tools.adb, state.ctx.tools.mirror
    );

    // Completions, signals and anything else off the UI thread
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
    signals::spawn_signal_handler(msg_tx.clone());
    let dispatcher = Dispatcher::new(Arc::new(bridge), msg_tx);

    if let Ok(size) = term.size() {
        process_message(
            &mut state,
            Message::Resize {
                width: size.width,
                height: size.height,
            },
            &dispatcher,
        );
    }
    process_message(
        &mut state,
        Message::SwitchScreen(ScreenId::Dashboard),
        &dispatcher,
    );

    let result = run_loop(&mut term, &mut state, msg_rx, &dispatcher);
    if let Err(ref e) = result {
        error!("Event loop failed: {}", e);
    }

    terminal::restore();

    result
}

/// Main event loop
fn run_loop<B>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    dispatcher: &Dispatcher<B>,
) -> Result<()>
where
    B: DeviceBridge + Send + Sync + 'static,
{
    while !state.should_quit() {
        drain_messages(state, &mut msg_rx, dispatcher);

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, dispatcher);
        }
    }

    Ok(())
}

/// Process every message already queued (completions, signals) without
/// waiting. Returns how many were handled.
fn drain_messages<B>(
    state: &mut AppState,
    msg_rx: &mut mpsc::Receiver<Message>,
    dispatcher: &Dispatcher<B>,
) -> usize
where
    B: DeviceBridge + Send + Sync + 'static,
{
    let mut handled = 0;
    while let Ok(msg) = msg_rx.try_recv() {
        process_message(state, msg, dispatcher);
        handled += 1;
    }
    handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbt_app::Screen;
    use adbt_bridge::test_utils::FakeBridge;

    use crate::test_utils::create_test_state_with_device;

    fn buffered_lines(state: &AppState) -> usize {
        match &state.screen {
            Screen::Logcat(logcat) => logcat.buffer.len(),
            _ => 0,
        }
    }

    #[tokio::test]
    async fn test_drain_handles_whole_burst() {
        let mut state = create_test_state_with_device();
        let (msg_tx, mut msg_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let dispatcher = Dispatcher::new(Arc::new(FakeBridge::new()), msg_tx.clone());

        for width in 1..=100 {
            msg_tx
                .send(Message::Resize { width, height: 24 })
                .await
                .unwrap();
        }

        assert_eq!(drain_messages(&mut state, &mut msg_rx, &dispatcher), 100);
        assert_eq!(state.ctx.width, 100);
        assert_eq!(drain_messages(&mut state, &mut msg_rx, &dispatcher), 0);
    }

    #[tokio::test]
    async fn test_drain_stops_at_quit() {
        let mut state = create_test_state_with_device();
        let (msg_tx, mut msg_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let dispatcher = Dispatcher::new(Arc::new(FakeBridge::new()), msg_tx.clone());

        msg_tx.send(Message::Quit).await.unwrap();
        drain_messages(&mut state, &mut msg_rx, &dispatcher);

        assert!(state.should_quit());
    }

    /// Each loop iteration drains once and then blocks for a full poll
    /// interval; a busy log must still be ingested well within a second.
    #[tokio::test(start_paused = true)]
    async fn test_logcat_tailing_not_bound_by_poll_interval() {
        let lines: Vec<String> = (0..500).map(|n| format!("I/Tag( 1): line {}", n)).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let bridge = FakeBridge::new().with_logcat(&refs);

        let mut state = create_test_state_with_device();
        let (msg_tx, mut msg_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let dispatcher = Dispatcher::new(Arc::new(bridge), msg_tx);
        process_message(
            &mut state,
            Message::SwitchScreen(ScreenId::Logcat),
            &dispatcher,
        );

        let iterations = 1000 / event::POLL_INTERVAL.as_millis() as usize;
        for _ in 0..iterations {
            drain_messages(&mut state, &mut msg_rx, &dispatcher);
            tokio::time::sleep(event::POLL_INTERVAL).await;
        }

        assert_eq!(buffered_lines(&state), 500);
    }
}
