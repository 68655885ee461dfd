//! Process-backed bridge that shells out to the `adb` binary

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use adbt_core::prelude::*;

use crate::bridge::DeviceBridge;
use crate::logcat::LogcatStream;

/// Talks to devices by running `adb` (and `scrcpy` for mirroring)
#[derive(Debug, Clone)]
pub struct AdbClient {
    adb_path: PathBuf,
    mirror_path: PathBuf,
}

impl AdbClient {
    pub fn new(adb_path: impl Into<PathBuf>, mirror_path: impl Into<PathBuf>) -> Self {
        Self {
            adb_path: adb_path.into(),
            mirror_path: mirror_path.into(),
        }
    }

    pub fn adb_path(&self) -> &Path {
        &self.adb_path
    }

    pub fn mirror_path(&self) -> &Path {
        &self.mirror_path
    }
}

impl Default for AdbClient {
    fn default() -> Self {
        Self::new("adb", "scrcpy")
    }
}

/// Full argv including the optional `-s <serial>` prefix
pub(crate) fn build_args<'a>(serial: Option<&'a str>, args: &[&'a str]) -> Vec<&'a str> {
    let mut argv = Vec::with_capacity(args.len() + 2);
    if let Some(serial) = serial.filter(|s| !s.is_empty()) {
        argv.push("-s");
        argv.push(serial);
    }
    argv.extend_from_slice(args);
    argv
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Map a non-zero exit into a bridge error carrying the trimmed output
fn failure(status: ExitStatus, output: &str) -> Error {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        Error::bridge(describe_status(status))
    } else {
        Error::bridge(format!("{}: {}", describe_status(status), trimmed))
    }
}

impl DeviceBridge for AdbClient {
    async fn execute(&self, serial: Option<&str>, args: &[&str]) -> Result<String> {
        let argv = build_args(serial, args);
        debug!("adb {}", argv.join(" "));

        let output = Command::new(&self.adb_path)
            .args(&argv)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::AdbNotFound
                } else {
                    Error::spawn(e.to_string())
                }
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            let err = failure(output.status, &combined);
            warn!("adb {} failed: {}", argv.join(" "), err);
            return Err(err);
        }

        trace!("adb {} -> {} bytes", argv.join(" "), combined.len());
        Ok(combined)
    }

    async fn spawn_logcat(&self, serial: &str) -> Result<LogcatStream> {
        LogcatStream::spawn(&self.adb_path, serial)
    }

    async fn launch_mirror(&self, serial: &str) -> Result<()> {
        info!("Launching {} for {}", self.mirror_path.display(), serial);

        // Detached: the mirror window outlives the screen that opened it
        let mut child = Command::new(&self.mirror_path)
            .args(["-s", serial])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_missing(self.mirror_path.display().to_string())
                } else {
                    Error::spawn(e.to_string())
                }
            })?;

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!("mirror exited: {:?}", status),
                Err(e) => warn!("mirror wait failed: {}", e),
            }
        });

        Ok(())
    }
}
