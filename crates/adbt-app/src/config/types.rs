//! Configuration types for adbt
//!
//! Every section deserializes with defaults so a partial `config.toml`
//! only overrides what it names.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Largest log buffer the viewer keeps
pub const MAX_LOG_BUFFER: usize = 1000;

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub bridge: BridgeSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub logcat: LogcatSettings,

    #[serde(default)]
    pub monitor: MonitorSettings,

    #[serde(default)]
    pub files: FilesSettings,
}

/// External binaries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeSettings {
    #[serde(default = "default_adb_path")]
    pub adb_path: PathBuf,

    /// Screen-mirroring companion
    #[serde(default = "default_mirror_path")]
    pub mirror_path: PathBuf,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            adb_path: default_adb_path(),
            mirror_path: default_mirror_path(),
        }
    }
}

fn default_adb_path() -> PathBuf {
    PathBuf::from("adb")
}

fn default_mirror_path() -> PathBuf {
    PathBuf::from("scrcpy")
}

/// Behavior settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Ask before uninstall, clear data, force-stop, delete and reboots
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,

    /// Select the only connected device without asking
    #[serde(default = "default_true")]
    pub auto_select_single: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            confirm_destructive: true,
            auto_select_single: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Which expiry timers may clear a visible toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastExpiry {
    /// Only the timer of the toast currently shown
    #[default]
    Latest,
    /// Any timer, including one left over from a superseded toast
    Any,
}

/// Icon rendering mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Safe Unicode characters that work in all terminals
    #[default]
    Unicode,
    /// Nerd Font glyphs, requires a Nerd Font installed in the terminal
    NerdFonts,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_toast_ms")]
    pub toast_duration_ms: u64,

    #[serde(default = "default_error_toast_ms")]
    pub error_toast_duration_ms: u64,

    #[serde(default)]
    pub toast_expiry: ToastExpiry,

    #[serde(default)]
    pub icons: IconMode,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_ms(),
            error_toast_duration_ms: default_error_toast_ms(),
            toast_expiry: ToastExpiry::default(),
            icons: IconMode::default(),
        }
    }
}

impl UiSettings {
    pub fn toast_duration(&self, is_error: bool) -> Duration {
        if is_error {
            Duration::from_millis(self.error_toast_duration_ms)
        } else {
            Duration::from_millis(self.toast_duration_ms)
        }
    }
}

fn default_toast_ms() -> u64 {
    2000
}

fn default_error_toast_ms() -> u64 {
    3000
}

/// Log viewer settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogcatSettings {
    /// Lines retained before the oldest are evicted
    #[serde(default = "default_buffer_lines")]
    pub buffer_lines: usize,
}

impl Default for LogcatSettings {
    fn default() -> Self {
        Self {
            buffer_lines: default_buffer_lines(),
        }
    }
}

impl LogcatSettings {
    /// Buffer capacity clamped to `1..=MAX_LOG_BUFFER`
    pub fn capacity(&self) -> usize {
        self.buffer_lines.clamp(1, MAX_LOG_BUFFER)
    }
}

fn default_buffer_lines() -> usize {
    MAX_LOG_BUFFER
}

/// Performance monitor settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl MonitorSettings {
    /// Sampling period, never shorter than 250ms
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(250))
    }
}

fn default_interval_ms() -> u64 {
    1000
}

/// File browser settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilesSettings {
    #[serde(default = "default_start_path")]
    pub start_path: String,

    /// Local directory pulls land in; empty means `~/Downloads`
    #[serde(default)]
    pub pull_dir: String,
}

impl Default for FilesSettings {
    fn default() -> Self {
        Self {
            start_path: default_start_path(),
            pull_dir: String::new(),
        }
    }
}

impl FilesSettings {
    /// Resolve the directory pulled files are written to
    pub fn pull_directory(&self) -> PathBuf {
        if !self.pull_dir.is_empty() {
            return PathBuf::from(&self.pull_dir);
        }
        dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(std::env::temp_dir)
    }
}

fn default_start_path() -> String {
    "/sdcard".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bridge.adb_path, PathBuf::from("adb"));
        assert!(settings.behavior.confirm_destructive);
        assert!(settings.behavior.auto_select_single);
        assert_eq!(settings.ui.toast_expiry, ToastExpiry::Latest);
        assert_eq!(settings.logcat.capacity(), 1000);
        assert_eq!(settings.files.start_path, "/sdcard");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [ui]
            toast_expiry = "any"

            [behavior]
            confirm_destructive = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.ui.toast_expiry, ToastExpiry::Any);
        assert_eq!(settings.ui.toast_duration_ms, 2000);
        assert!(!settings.behavior.confirm_destructive);
        assert!(settings.behavior.auto_select_single);
        assert_eq!(settings.monitor.interval_ms, 1000);
    }

    #[test]
    fn test_buffer_capacity_is_clamped() {
        let big = LogcatSettings { buffer_lines: 50_000 };
        assert_eq!(big.capacity(), MAX_LOG_BUFFER);
        let zero = LogcatSettings { buffer_lines: 0 };
        assert_eq!(zero.capacity(), 1);
    }

    #[test]
    fn test_toast_duration_by_severity() {
        let ui = UiSettings::default();
        assert_eq!(ui.toast_duration(false), Duration::from_millis(2000));
        assert_eq!(ui.toast_duration(true), Duration::from_millis(3000));
    }

    #[test]
    fn test_pull_directory_override() {
        let files = FilesSettings {
            start_path: "/".into(),
            pull_dir: "/tmp/pulls".into(),
        };
        assert_eq!(files.pull_directory(), PathBuf::from("/tmp/pulls"));
    }

    #[test]
    fn test_icon_mode_display() {
        assert_eq!(IconMode::NerdFonts.to_string(), "nerd_fonts");
    }
}
