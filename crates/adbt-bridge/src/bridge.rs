//! The device-bridge seam
//!
//! Every higher layer talks to the device through [`DeviceBridge`]: one
//! blocking-style call that runs an `adb` command to completion, a streaming
//! variant for logcat, and a fire-and-forget launcher for the mirroring tool.

use adbt_core::prelude::*;

use crate::logcat::LogcatStream;

/// Operations the engine needs from the device bridge
#[trait_variant::make(DeviceBridge: Send)]
pub trait LocalDeviceBridge {
    /// Run `adb [-s serial] args...` and return its combined output.
    ///
    /// All-or-nothing: a non-zero exit is an error carrying the trimmed output.
    async fn execute(&self, serial: Option<&str>, args: &[&str]) -> Result<String>;

    /// Start a continuous `logcat` for `serial`
    async fn spawn_logcat(&self, serial: &str) -> Result<LogcatStream>;

    /// Launch the screen-mirroring companion, detached
    async fn launch_mirror(&self, serial: &str) -> Result<()>;
}

/// Split raw output into trimmed, non-empty lines
pub fn parse_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run a `shell` command on the device
pub async fn shell<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    args: &[&str],
) -> Result<String> {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push("shell");
    argv.extend_from_slice(args);
    DeviceBridge::execute(bridge, Some(serial), &argv).await
}
