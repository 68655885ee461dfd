//! # adbt-bridge - adb Process Management
//!
//! Runs `adb` commands, streams logcat, and parses the text each device
//! command prints into typed values.
//!
//! Depends on [`adbt_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### The Bridge Seam
//! - [`DeviceBridge`] - Async trait every operation is generic over
//! - [`AdbClient`] - Production implementation spawning the `adb` binary
//! - [`LogcatStream`] - Cancel-safe, interruptible line stream over `adb logcat`
//!
//! ### Device Operations
//! - [`list_devices()`], [`pair()`] - Discovery and wireless pairing
//! - [`list_packages()`], [`run_app_action()`] - App management
//! - [`list_dir()`], [`delete_path()`], [`pull_file()`] - File browsing
//! - [`fetch_details()`], [`run_device_action()`] - Device info and controls
//! - [`sample_stats()`] - `/proc` counters for the performance monitor
//!
//! ### Platform Utilities
//! - [`ToolAvailability`] - Check for adb and scrcpy

pub mod bridge;
pub mod client;
pub mod device_info;
pub mod devices;
pub mod files;
pub mod logcat;
pub mod monitor;
pub mod packages;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tool_availability;

pub use bridge::{parse_lines, shell, DeviceBridge, LocalDeviceBridge};
pub use client::AdbClient;
pub use device_info::{
    fetch_details, reboot, run_device_action, toggle_screen, toggle_wifi, DeviceAction,
    DeviceDetails, RebootTarget,
};
pub use devices::{list_devices, pair, parse_device_list};
pub use files::{
    child_path, delete_path, list_dir, parent_path, parse_ls_line, pull_file, FileEntry,
};
pub use logcat::{parse_priority, LogcatStream, Pulled, PULL_BATCH};
pub use monitor::{cpu_percent, rate, sample_stats, SystemStats};
pub use packages::{list_packages, parse_packages, run_app_action, AppAction, AppPackage};
pub use tool_availability::ToolAvailability;
