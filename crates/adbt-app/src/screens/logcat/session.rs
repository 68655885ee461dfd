//! Streaming session state machine
//!
//! ```text
//! Idle -> Starting -> Streaming <-> Paused
//!             |           |  \
//!             v           v   -> Stopped
//!          Errored     Errored
//! ```
//!
//! The session never reads lines itself. Each delivered batch re-arms exactly
//! one [`Command::PullLogLines`], tagged with a pull id. At most one pull is
//! outstanding at a time, and none while paused: pausing interrupts the
//! stream so the in-flight pull returns without a line.

use std::sync::Arc;

use adbt_bridge::LogcatStream;
use adbt_core::prelude::*;

use crate::command::Command;

use super::buffer::LogBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    #[default]
    Idle,
    Starting,
    Streaming,
    Paused,
    Stopped,
    Errored,
}

impl StreamState {
    /// `Stopped` and `Errored` end a session; a new one must be built
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamState::Stopped | StreamState::Errored)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreamState::Idle => "idle",
            StreamState::Starting => "starting",
            StreamState::Streaming => "streaming",
            StreamState::Paused => "paused",
            StreamState::Stopped => "stopped",
            StreamState::Errored => "error",
        }
    }
}

#[derive(Debug, Default)]
pub struct LogSession {
    state: StreamState,
    stream: Option<Arc<LogcatStream>>,
    /// Id handed to the next armed pull
    next_pull: u64,
    /// The single pull whose completion may re-arm
    outstanding: Option<u64>,
    /// Pull woken by a pause; a line it still delivers is kept
    interrupted: Option<u64>,
    error: Option<String>,
}

impl LogSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn outstanding_pulls(&self) -> usize {
        usize::from(self.outstanding.is_some())
    }

    /// `Idle -> Starting`
    pub fn start(&mut self, serial: &str) -> Option<Command> {
        if self.state != StreamState::Idle {
            return None;
        }
        self.state = StreamState::Starting;
        Some(Command::StartLogcat {
            serial: serial.to_string(),
        })
    }

    /// The process came up (or failed to)
    pub fn on_started(
        &mut self,
        result: std::result::Result<Arc<LogcatStream>, String>,
    ) -> Option<Command> {
        match result {
            Ok(stream) if self.state == StreamState::Starting => {
                info!("Logcat streaming for {}", stream.serial());
                self.stream = Some(stream);
                self.state = StreamState::Streaming;
                self.arm()
            }
            Ok(stream) => {
                // Stopped while starting; nobody will read this one
                stream.stop();
                None
            }
            Err(e) => {
                warn!("Logcat failed to start: {}", e);
                self.fail(e);
                None
            }
        }
    }

    /// A pull completed. Its lines go into `buffer`; the next pull is returned
    /// only while still streaming.
    pub fn on_pulled(
        &mut self,
        pull: u64,
        result: std::result::Result<Option<Vec<String>>, String>,
        buffer: &mut LogBuffer,
    ) -> Option<Command> {
        if self.outstanding != Some(pull) {
            if self.interrupted == Some(pull) {
                self.interrupted = None;
                if let Ok(Some(lines)) = result {
                    buffer.extend(lines);
                }
            } else {
                debug!("Ignoring unexpected logcat pull {}", pull);
            }
            return None;
        }
        self.outstanding = None;

        match result {
            Ok(Some(lines)) => {
                buffer.extend(lines);
                self.arm()
            }
            Ok(None) => {
                info!("Logcat stream ended");
                self.state = StreamState::Stopped;
                self.release();
                None
            }
            Err(e) => {
                warn!("Logcat stream error: {}", e);
                self.fail(e);
                None
            }
        }
    }

    /// `Streaming -> Paused`, waking the in-flight pull
    pub fn pause(&mut self) {
        if self.state != StreamState::Streaming {
            return;
        }
        self.state = StreamState::Paused;
        if let Some(pull) = self.outstanding.take() {
            self.interrupted = Some(pull);
            if let Some(stream) = &self.stream {
                stream.interrupt();
            }
        }
    }

    /// `Paused -> Streaming`, arming exactly one pull
    pub fn resume(&mut self) -> Option<Command> {
        if self.state != StreamState::Paused {
            return None;
        }
        self.state = StreamState::Streaming;
        self.arm()
    }

    pub fn toggle(&mut self) -> Option<Command> {
        match self.state {
            StreamState::Streaming => {
                self.pause();
                None
            }
            StreamState::Paused => self.resume(),
            _ => None,
        }
    }

    /// Kill the process. Idempotent; an errored session stays errored.
    pub fn stop(&mut self) {
        if self.state != StreamState::Errored {
            self.state = StreamState::Stopped;
        }
        self.release();
    }

    fn arm(&mut self) -> Option<Command> {
        if self.state != StreamState::Streaming || self.outstanding.is_some() {
            return None;
        }
        let stream = self.stream.clone()?;
        let pull = self.next_pull;
        self.next_pull += 1;
        self.outstanding = Some(pull);
        Some(Command::PullLogLines {
            generation: stream.generation(),
            stream,
            pull,
        })
    }

    fn fail(&mut self, error: String) {
        self.state = StreamState::Errored;
        self.error = Some(error);
        self.release();
    }

    fn release(&mut self) {
        self.outstanding = None;
        self.interrupted = None;
        if let Some(stream) = self.stream.take() {
            stream.stop();
        }
    }
}
