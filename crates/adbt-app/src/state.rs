//! Application state
//!
//! [`AppContext`] is the shared record every screen reads and writes through
//! the engine. [`AppState`] adds the active screen and the epoch that stamps
//! dispatched commands.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use adbt_bridge::ToolAvailability;
use adbt_core::prelude::*;
use adbt_core::Device;

use crate::config::Settings;
use crate::screens::Screen;

/// Rows taken by the header, body frame and help bar
const CHROME_ROWS: u16 = 7;
/// Smallest body height screens lay out against
const MIN_BODY_ROWS: usize = 10;

/// The mutually exclusive screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Devices,
    Dashboard,
    Apps,
    Files,
    Logcat,
    DeviceInfo,
    Monitor,
}

impl ScreenId {
    pub fn title(&self) -> &'static str {
        match self {
            ScreenId::Devices => "Device Selection",
            ScreenId::Dashboard => "Dashboard",
            ScreenId::Apps => "Apps",
            ScreenId::Files => "Files",
            ScreenId::Logcat => "Logcat",
            ScreenId::DeviceInfo => "Device Info",
            ScreenId::Monitor => "Performance Monitor",
        }
    }

    /// Screens that operate on the selected device
    pub fn requires_device(&self) -> bool {
        !matches!(self, ScreenId::Devices | ScreenId::Dashboard)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Scroll position of one screen's scrollable region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// First visible row when not following
    pub offset: usize,
    /// Pinned to the bottom as content grows
    pub follow: bool,
}

impl ScrollState {
    fn max_offset(total: usize, height: usize) -> usize {
        total.saturating_sub(height)
    }

    /// Offset actually shown for `total` rows in a window of `height`
    pub fn effective_offset(&self, total: usize, height: usize) -> usize {
        let max = Self::max_offset(total, height);
        if self.follow {
            max
        } else {
            self.offset.min(max)
        }
    }

    pub fn visible_range(&self, total: usize, height: usize) -> Range<usize> {
        let start = self.effective_offset(total, height);
        start..(start + height).min(total)
    }

    pub fn scroll_up(&mut self, lines: usize, total: usize, height: usize) {
        self.offset = self
            .effective_offset(total, height)
            .saturating_sub(lines);
        self.follow = false;
    }

    /// Scrolling back onto the last page resumes following
    pub fn scroll_down(&mut self, lines: usize, total: usize, height: usize) {
        let max = Self::max_offset(total, height);
        self.offset = (self.effective_offset(total, height) + lines).min(max);
        self.follow = self.offset == max;
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
        self.follow = false;
    }

    pub fn to_bottom(&mut self) {
        self.follow = true;
    }

    /// Move the window the least amount that keeps `line` visible
    pub fn ensure_visible(&mut self, line: usize, height: usize) {
        let height = height.max(1);
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
    }
}

/// Shared state handed to whichever screen is active
#[derive(Debug, Default)]
pub struct AppContext {
    pub selected_device: Option<Device>,
    pub devices: Vec<Device>,
    pub width: u16,
    pub height: u16,

    /// Scroll positions keyed by screen; survives screen switches
    pub viewports: HashMap<ScreenId, ScrollState>,

    pub settings: Settings,
    pub tools: ToolAvailability,

    /// Serial requested on the command line, selected once a refresh sees it
    pub preferred_serial: Option<String>,
}

impl AppContext {
    pub fn has_device(&self) -> bool {
        self.selected_device.is_some()
    }

    pub fn serial(&self) -> Option<&str> {
        self.selected_device.as_ref().map(|d| d.serial.as_str())
    }

    pub fn select_device(&mut self, device: Device) {
        info!("Selected device {}", device.display_name());
        self.selected_device = Some(device);
    }

    /// Store a fresh device list.
    ///
    /// The selection is refreshed from the new record with the same serial,
    /// and a pending command-line serial is selected once it shows up
    /// connected.
    pub fn set_devices(&mut self, devices: Vec<Device>) {
        if let Some(selected) = &self.selected_device {
            if let Some(fresh) = devices.iter().find(|d| d.serial == selected.serial) {
                self.selected_device = Some(fresh.clone());
            }
        }

        if let Some(preferred) = &self.preferred_serial {
            if let Some(device) = devices
                .iter()
                .find(|d| &d.serial == preferred && d.is_connected())
            {
                self.selected_device = Some(device.clone());
                self.preferred_serial = None;
            }
        }

        self.devices = devices;
    }

    /// Select the lone device when exactly one is attached and connected
    pub fn auto_select_single(&mut self) -> bool {
        match self.devices.as_slice() {
            [only] if only.is_connected() => {
                let only = only.clone();
                self.select_device(only);
                true
            }
            _ => false,
        }
    }

    pub fn viewport(&self, id: ScreenId) -> ScrollState {
        self.viewports.get(&id).copied().unwrap_or_default()
    }

    pub fn viewport_mut(&mut self, id: ScreenId) -> &mut ScrollState {
        self.viewports.entry(id).or_default()
    }

    /// Rows available to a screen body
    pub fn body_height(&self) -> usize {
        (self.height.saturating_sub(CHROME_ROWS) as usize).max(MIN_BODY_ROWS)
    }
}

/// Complete application state (Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub ctx: AppContext,

    /// The single active screen
    pub screen: Screen,

    /// Generation of the active screen; bumped on every switch
    pub epoch: u64,

    quitting: bool,
}

impl AppState {
    /// State before the first switch. The dashboard is constructed but not
    /// initialized; the run loop opens it with `SwitchScreen(Dashboard)`.
    pub fn new(settings: Settings, tools: ToolAvailability) -> Self {
        let ctx = AppContext {
            settings,
            tools,
            ..Default::default()
        };
        let screen = Screen::create(ScreenId::Dashboard, &ctx);
        Self {
            ctx,
            screen,
            epoch: 0,
            quitting: false,
        }
    }

    pub fn active_screen(&self) -> ScreenId {
        self.screen.id()
    }

    pub fn quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default(), ToolAvailability::default())
    }
}
