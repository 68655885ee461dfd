//! Domain types shared by every layer

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Devices
// ─────────────────────────────────────────────────────────────────────────────

/// Connection state reported by `adb devices`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeviceState {
    /// Authorized and reachable
    Device,
    Offline,
    Unauthorized,
    /// Any other state string (recovery, sideload, bootloader, ...)
    Other(String),
    #[default]
    Unknown,
}

impl DeviceState {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "device" => DeviceState::Device,
            "offline" => DeviceState::Offline,
            "unauthorized" => DeviceState::Unauthorized,
            "" => DeviceState::Unknown,
            other => DeviceState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeviceState::Device => "device",
            DeviceState::Offline => "offline",
            DeviceState::Unauthorized => "unauthorized",
            DeviceState::Other(s) => s,
            DeviceState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A device known to the bridge. `serial` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Device {
    pub serial: String,
    pub model: String,
    pub state: DeviceState,
    pub android_version: String,
}

impl Device {
    pub fn new(serial: impl Into<String>, state: DeviceState) -> Self {
        Self {
            serial: serial.into(),
            state,
            ..Default::default()
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == DeviceState::Device
    }

    /// "Model (serial)", or just the serial when the model is unknown
    pub fn display_name(&self) -> String {
        if self.model.is_empty() {
            self.serial.clone()
        } else {
            format!("{} ({})", self.model, self.serial)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Log priorities
// ─────────────────────────────────────────────────────────────────────────────

/// Android log priority, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogPriority {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogPriority {
    pub const ALL: [LogPriority; 6] = [
        LogPriority::Verbose,
        LogPriority::Debug,
        LogPriority::Info,
        LogPriority::Warn,
        LogPriority::Error,
        LogPriority::Fatal,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'V' => Some(LogPriority::Verbose),
            'D' => Some(LogPriority::Debug),
            'I' => Some(LogPriority::Info),
            'W' => Some(LogPriority::Warn),
            'E' => Some(LogPriority::Error),
            'F' | 'A' => Some(LogPriority::Fatal),
            _ => None,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            LogPriority::Verbose => "V",
            LogPriority::Debug => "D",
            LogPriority::Info => "I",
            LogPriority::Warn => "W",
            LogPriority::Error => "E",
            LogPriority::Fatal => "F",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_state_parse() {
        assert_eq!(DeviceState::parse("device"), DeviceState::Device);
        assert_eq!(DeviceState::parse("offline"), DeviceState::Offline);
        assert_eq!(DeviceState::parse("unauthorized"), DeviceState::Unauthorized);
        assert_eq!(
            DeviceState::parse("recovery"),
            DeviceState::Other("recovery".into())
        );
    }

    #[test]
    fn test_only_device_state_is_connected() {
        assert!(Device::new("a", DeviceState::Device).is_connected());
        assert!(!Device::new("a", DeviceState::Offline).is_connected());
        assert!(!Device::new("a", DeviceState::Unauthorized).is_connected());
    }

    #[test]
    fn test_display_name() {
        let mut device = Device::new("emulator-5554", DeviceState::Device);
        assert_eq!(device.display_name(), "emulator-5554");
        device.model = "Pixel 7".into();
        assert_eq!(device.display_name(), "Pixel 7 (emulator-5554)");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(LogPriority::Verbose < LogPriority::Debug);
        assert!(LogPriority::Error < LogPriority::Fatal);
        assert_eq!(LogPriority::from_char('W'), Some(LogPriority::Warn));
        assert_eq!(LogPriority::from_char('A'), Some(LogPriority::Fatal));
        assert_eq!(LogPriority::from_char('x'), None);
    }
}
