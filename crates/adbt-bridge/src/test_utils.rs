//! Test utilities for bridge consumers
//!
//! [`FakeBridge`] answers `execute` calls from a table of canned responses
//! and records every invocation, so engine tests can assert exactly which
//! commands ran without a device attached.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use tokio::io::BufReader;

use adbt_core::prelude::*;
use adbt_core::{Device, DeviceState};

use crate::bridge::DeviceBridge;
use crate::client::build_args;
use crate::logcat::LogcatStream;

/// Scripted stand-in for `adb`
#[derive(Debug, Default)]
pub struct FakeBridge {
    responses: HashMap<String, std::result::Result<String, String>>,
    calls: Mutex<Vec<String>>,
    logcat: Option<std::result::Result<String, String>>,
    mirror_error: Option<String>,
}

fn key(args: &[&str]) -> String {
    args.join(" ")
}

impl FakeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `args` (including any `-s serial` prefix) with `output`
    pub fn respond(mut self, args: &[&str], output: &str) -> Self {
        self.responses.insert(key(args), Ok(output.to_string()));
        self
    }

    /// Make `args` fail with `message`
    pub fn fail(mut self, args: &[&str], message: &str) -> Self {
        self.responses.insert(key(args), Err(message.to_string()));
        self
    }

    /// Lines the next logcat stream will yield before EOF
    pub fn with_logcat(mut self, lines: &[&str]) -> Self {
        let mut text = lines.join("\n");
        text.push('\n');
        self.logcat = Some(Ok(text));
        self
    }

    pub fn fail_logcat(mut self, message: &str) -> Self {
        self.logcat = Some(Err(message.to_string()));
        self
    }

    pub fn fail_mirror(mut self, message: &str) -> Self {
        self.mirror_error = Some(message.to_string());
        self
    }

    /// Every recorded invocation, argv joined with spaces
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of recorded invocations containing `needle`
    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(needle)).count()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl DeviceBridge for FakeBridge {
    async fn execute(&self, serial: Option<&str>, args: &[&str]) -> Result<String> {
        let call = key(&build_args(serial, args));
        self.record(call.clone());
        match self.responses.get(&call) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(Error::bridge(message.clone())),
            None => Err(Error::bridge(format!("unexpected command: {}", call))),
        }
    }

    async fn spawn_logcat(&self, serial: &str) -> Result<LogcatStream> {
        self.record(format!("-s {} logcat", serial));
        match &self.logcat {
            Some(Ok(text)) => Ok(LogcatStream::from_reader(
                serial,
                BufReader::new(Cursor::new(text.clone())),
            )),
            Some(Err(message)) => Err(Error::spawn(message.clone())),
            None => Ok(LogcatStream::from_reader(
                serial,
                BufReader::new(Cursor::new(String::new())),
            )),
        }
    }

    async fn launch_mirror(&self, serial: &str) -> Result<()> {
        self.record(format!("scrcpy -s {}", serial));
        match &self.mirror_error {
            Some(message) => Err(Error::tool_missing(message.clone())),
            None => Ok(()),
        }
    }
}

/// A connected device with model and release filled in
pub fn test_device(serial: &str, model: &str) -> Device {
    Device {
        serial: serial.to_string(),
        model: model.to_string(),
        state: DeviceState::Device,
        android_version: "14".to_string(),
    }
}

/// A device in an arbitrary state with no properties
pub fn test_device_in_state(serial: &str, state: DeviceState) -> Device {
    Device::new(serial, state)
}
