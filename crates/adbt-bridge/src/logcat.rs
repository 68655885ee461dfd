//! Continuous logcat source
//!
//! [`LogcatStream`] wraps a long-lived `adb logcat` child and hands out a
//! batch of lines per [`next_lines`](LogcatStream::next_lines) call: it waits
//! for one line, then takes whatever else is already buffered, up to
//! [`PULL_BATCH`]. The caller drives the pace: nothing is read until a pull is
//! issued, so a paused viewer simply stops pulling. Pulls are cancel-safe and can be woken early with
//! [`interrupt`](LogcatStream::interrupt); [`stop`](LogcatStream::stop) ends the
//! stream for good and kills the process.

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, Command};
use tokio::sync::{oneshot, watch, Mutex};

use adbt_core::prelude::*;
use adbt_core::LogPriority;

/// Most lines a single pull returns
pub const PULL_BATCH: usize = 256;

/// `MM-DD HH:MM:SS.mmm  pid  tid P tag: msg` (`-v threadtime`, the default)
static THREADTIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+\s+\S+\s+\d+\s+\d+\s+([VDIWEFA])\s").expect("Invalid threadtime regex")
});

/// `MM-DD HH:MM:SS.mmm P/tag(pid): msg` (`-v time`)
static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+\s+\S+\s+([VDIWEFA])/").expect("Invalid time regex")
});

/// `P/tag(pid): msg` (`-v brief`)
static BRIEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([VDIWEFA])/").expect("Invalid brief regex"));

/// Extract the priority of a logcat line, if it has a recognizable one
pub fn parse_priority(line: &str) -> Option<LogPriority> {
    [&*THREADTIME, &*TIME, &*BRIEF]
        .iter()
        .find_map(|re| re.captures(line))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(LogPriority::from_char)
}

/// Outcome of a single pull
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pulled {
    /// At least one line, in stream order
    Lines(Vec<String>),
    /// The producer closed its output
    Eof,
    /// Woken by [`LogcatStream::interrupt`] before a line arrived
    Interrupted,
    /// The stream was stopped; no further lines will be produced
    Stopped,
}

type LineReader = Lines<Box<dyn AsyncBufRead + Send + Unpin>>;

/// A supervised log source
pub struct LogcatStream {
    serial: String,
    pid: Option<u32>,
    lines: Mutex<LineReader>,
    /// Bumped on every interrupt; pulls started under an older value return early
    interrupts: watch::Sender<u64>,
    stopped: AtomicBool,
    /// Tells the wait task to kill the child. Dropping it has the same effect.
    kill_tx: std::sync::Mutex<Option<oneshot::Sender<()>>>,
    exited: Arc<AtomicBool>,
}

impl fmt::Debug for LogcatStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogcatStream")
            .field("serial", &self.serial)
            .field("pid", &self.pid)
            .field("stopped", &self.is_stopped())
            .field("exited", &self.has_exited())
            .finish()
    }
}

impl LogcatStream {
    /// Spawn `adb -s <serial> logcat`
    pub fn spawn(adb_path: &Path, serial: &str) -> Result<Self> {
        info!("Starting logcat for {}", serial);

        let mut child = Command::new(adb_path)
            .args(["-s", serial, "logcat"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::AdbNotFound
                } else {
                    Error::spawn(e.to_string())
                }
            })?;

        let pid = child.id();
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::stream("logcat stdout was not captured"))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(Self::stderr_reader(stderr));
        }

        let exited = Arc::new(AtomicBool::new(false));
        let (kill_tx, kill_rx) = oneshot::channel::<()>();
        tokio::spawn(Self::wait_for_exit(child, kill_rx, Arc::clone(&exited)));

        info!("logcat started with PID: {:?}", pid);
        let reader: Box<dyn AsyncBufRead + Send + Unpin> = Box::new(BufReader::new(stdout));
        Ok(Self::build(serial, pid, reader, Some(kill_tx), exited))
    }

    /// Build a stream over an arbitrary reader with no backing process
    pub fn from_reader<R>(serial: impl Into<String>, reader: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        let serial = serial.into();
        Self::build(
            &serial,
            None,
            Box::new(reader),
            None,
            Arc::new(AtomicBool::new(false)),
        )
    }

    fn build(
        serial: &str,
        pid: Option<u32>,
        reader: Box<dyn AsyncBufRead + Send + Unpin>,
        kill_tx: Option<oneshot::Sender<()>>,
        exited: Arc<AtomicBool>,
    ) -> Self {
        let (interrupts, _) = watch::channel(0);
        Self {
            serial: serial.to_string(),
            pid,
            lines: Mutex::new(reader.lines()),
            interrupts,
            stopped: AtomicBool::new(false),
            kill_tx: std::sync::Mutex::new(kill_tx),
            exited,
        }
    }

    /// Owns the child until it exits on its own or is told to die
    async fn wait_for_exit(
        mut child: Child,
        kill_rx: oneshot::Receiver<()>,
        exited: Arc<AtomicBool>,
    ) {
        tokio::select! {
            result = child.wait() => {
                match result {
                    Ok(status) => info!("logcat exited with status: {:?}", status),
                    Err(e) => error!("Error waiting for logcat: {}", e),
                }
            }
            // Fires on an explicit kill and when the stream is dropped
            _ = kill_rx => {
                debug!("Killing logcat process");
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill logcat: {}", e);
                }
            }
        }
        exited.store(true, Ordering::Release);
    }

    async fn stderr_reader(stderr: tokio::process::ChildStderr) {
        let mut reader = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = reader.next_line().await {
            warn!("logcat stderr: {}", line);
        }
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Current interrupt generation; capture it when arming a pull
    pub fn generation(&self) -> u64 {
        *self.interrupts.borrow()
    }

    /// Read the next batch of lines.
    ///
    /// Waits for one line, then drains lines that are already available
    /// without waiting, up to [`PULL_BATCH`]. `generation` is the value of
    /// [`generation`](Self::generation) when the pull was armed. Any interrupt
    /// since then makes this return [`Pulled::Interrupted`] without consuming
    /// a line.
    pub async fn next_lines(&self, generation: u64) -> Result<Pulled> {
        if self.is_stopped() {
            return Ok(Pulled::Stopped);
        }

        let mut interrupts = self.interrupts.subscribe();
        if *interrupts.borrow_and_update() != generation {
            return Ok(self.interrupted());
        }

        let mut lines = self.lines.lock().await;
        let first = tokio::select! {
            biased;
            _ = interrupts.changed() => return Ok(self.interrupted()),
            next = lines.next_line() => match next {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(Pulled::Eof),
                Err(e) if self.is_stopped() => {
                    debug!("logcat read ended by stop: {}", e);
                    return Ok(Pulled::Stopped);
                }
                Err(e) => return Err(Error::stream(e.to_string())),
            },
        };

        let mut batch = vec![first];
        while batch.len() < PULL_BATCH {
            // `next_line` is cancel safe: a partial line stays buffered
            let next = tokio::select! {
                biased;
                next = lines.next_line() => next,
                _ = std::future::ready(()) => break,
            };
            match next {
                Ok(Some(line)) => batch.push(line),
                // EOF and errors surface on the following pull
                Ok(None) => break,
                Err(e) => {
                    debug!("logcat read failed mid-batch: {}", e);
                    break;
                }
            }
        }
        Ok(Pulled::Lines(batch))
    }

    fn interrupted(&self) -> Pulled {
        if self.is_stopped() {
            Pulled::Stopped
        } else {
            Pulled::Interrupted
        }
    }

    /// Wake any pending pull without ending the stream
    pub fn interrupt(&self) {
        self.interrupts.send_modify(|g| *g = g.wrapping_add(1));
    }

    /// End the stream and kill the process. Idempotent.
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        info!("Stopping logcat for {}", self.serial);
        self.interrupt();
        if let Ok(mut guard) = self.kill_tx.lock() {
            if let Some(tx) = guard.take() {
                // The wait task may already be gone
                let _ = tx.send(());
            }
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Whether the backing process has exited (always false without one)
    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::Acquire)
    }
}

impl Drop for LogcatStream {
    fn drop(&mut self) {
        self.stop();
    }
}
