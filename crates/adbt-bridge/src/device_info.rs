//! Extended device details and device-level actions

use std::fmt;

use adbt_core::format_kb_blocks;
use adbt_core::prelude::*;

use crate::bridge::{shell, DeviceBridge};

/// Details shown on the device info screen. A query that fails leaves its
/// fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDetails {
    pub battery_level: String,
    pub battery_status: String,
    pub storage_used: String,
    pub storage_total: String,
    pub screen_size: String,
    pub screen_density: String,
    pub ip_address: String,
}

fn battery_status(code: &str) -> String {
    match code {
        "1" => "Unknown",
        "2" => "Charging",
        "3" => "Discharging",
        "4" => "Not charging",
        "5" => "Full",
        other => other,
    }
    .to_string()
}

/// `dumpsys battery` → (level%, status)
pub fn parse_battery(output: &str) -> (String, String) {
    let mut level = String::new();
    let mut status = String::new();
    for line in output.lines().map(str::trim) {
        if let Some(value) = line.strip_prefix("level:") {
            level = format!("{}%", value.trim());
        } else if let Some(code) = line.strip_prefix("status:") {
            status = battery_status(code.trim());
        }
    }
    (level, status)
}

/// `df /data` → (used, total), from the second line
pub fn parse_storage(output: &str) -> (String, String) {
    let Some(row) = output.lines().nth(1) else {
        return (String::new(), String::new());
    };
    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() < 3 {
        return (String::new(), String::new());
    }
    (format_kb_blocks(fields[2]), format_kb_blocks(fields[1]))
}

/// `wm size` / `wm density` → the value after the first `:`
pub fn parse_wm_output(output: &str) -> String {
    output
        .lines()
        .find_map(|line| line.split_once(':').map(|(_, value)| value.trim().to_string()))
        .unwrap_or_else(|| output.trim().to_string())
}

/// `ip route` → the token after `src`, or `N/A`
pub fn parse_ip_address(output: &str) -> String {
    output
        .lines()
        .find_map(|line| {
            let mut fields = line.split_whitespace();
            fields.find(|f| *f == "src")?;
            fields.next().map(str::to_string)
        })
        .unwrap_or_else(|| "N/A".to_string())
}

async fn query<B: DeviceBridge + ?Sized>(bridge: &B, serial: &str, args: &[&str]) -> Option<String> {
    match shell(bridge, serial, args).await {
        Ok(output) => Some(output),
        Err(e) => {
            debug!("query {:?} on {} failed: {}", args, serial, e);
            None
        }
    }
}

/// Run every query independently; never fails as a whole
pub async fn fetch_details<B: DeviceBridge + ?Sized>(bridge: &B, serial: &str) -> DeviceDetails {
    let mut details = DeviceDetails::default();

    if let Some(out) = query(bridge, serial, &["dumpsys", "battery"]).await {
        (details.battery_level, details.battery_status) = parse_battery(&out);
    }
    if let Some(out) = query(bridge, serial, &["df", "/data"]).await {
        (details.storage_used, details.storage_total) = parse_storage(&out);
    }
    if let Some(out) = query(bridge, serial, &["wm", "size"]).await {
        details.screen_size = parse_wm_output(&out);
    }
    if let Some(out) = query(bridge, serial, &["wm", "density"]).await {
        details.screen_density = parse_wm_output(&out);
    }
    if let Some(out) = query(bridge, serial, &["ip", "route"]).await {
        details.ip_address = parse_ip_address(&out);
    }

    details
}

/// Reboot targets; each is its own argv token after `reboot`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebootTarget {
    System,
    Recovery,
    Bootloader,
}

impl RebootTarget {
    fn args(&self) -> &'static [&'static str] {
        match self {
            RebootTarget::System => &["reboot"],
            RebootTarget::Recovery => &["reboot", "recovery"],
            RebootTarget::Bootloader => &["reboot", "bootloader"],
        }
    }
}

/// Actions offered on the device info screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    Mirror,
    ToggleWifi,
    ToggleScreen,
    Reboot(RebootTarget),
}

impl DeviceAction {
    pub const ALL: [DeviceAction; 6] = [
        DeviceAction::Mirror,
        DeviceAction::ToggleWifi,
        DeviceAction::ToggleScreen,
        DeviceAction::Reboot(RebootTarget::System),
        DeviceAction::Reboot(RebootTarget::Recovery),
        DeviceAction::Reboot(RebootTarget::Bootloader),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DeviceAction::Mirror => "scrcpy",
            DeviceAction::ToggleWifi => "toggle wifi",
            DeviceAction::ToggleScreen => "toggle screen",
            DeviceAction::Reboot(RebootTarget::System) => "reboot",
            DeviceAction::Reboot(RebootTarget::Recovery) => "reboot recovery",
            DeviceAction::Reboot(RebootTarget::Bootloader) => "reboot bootloader",
        }
    }

    /// Menu title
    pub fn title(&self) -> &'static str {
        match self {
            DeviceAction::Mirror => "Mirror screen (scrcpy)",
            DeviceAction::ToggleWifi => "Toggle Wi-Fi",
            DeviceAction::ToggleScreen => "Toggle screen",
            DeviceAction::Reboot(RebootTarget::System) => "Reboot",
            DeviceAction::Reboot(RebootTarget::Recovery) => "Reboot to recovery",
            DeviceAction::Reboot(RebootTarget::Bootloader) => "Reboot to bootloader",
        }
    }

    pub fn key(&self) -> char {
        match self {
            DeviceAction::Mirror => 'c',
            DeviceAction::ToggleWifi => 'w',
            DeviceAction::ToggleScreen => 's',
            DeviceAction::Reboot(RebootTarget::System) => 'r',
            DeviceAction::Reboot(RebootTarget::Recovery) => 'R',
            DeviceAction::Reboot(RebootTarget::Bootloader) => 'b',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.key() == c)
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, DeviceAction::Reboot(_))
    }
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Flip Wi-Fi based on what `dumpsys wifi` reports.
///
/// Returns the label of what was done, `wifi enable` or `wifi disable`.
pub async fn toggle_wifi<B: DeviceBridge + ?Sized>(bridge: &B, serial: &str) -> Result<String> {
    let state = shell(bridge, serial, &["dumpsys", "wifi"]).await?;
    let verb = if state.contains("Wi-Fi is disabled") {
        "enable"
    } else if state.contains("Wi-Fi is enabled") {
        "disable"
    } else {
        return Err(Error::bridge("unable to determine wifi state"));
    };

    shell(bridge, serial, &["svc", "wifi", verb]).await?;
    Ok(format!("wifi {}", verb))
}

/// Power-button key event
pub async fn toggle_screen<B: DeviceBridge + ?Sized>(bridge: &B, serial: &str) -> Result<()> {
    shell(bridge, serial, &["input", "keyevent", "26"]).await?;
    Ok(())
}

pub async fn reboot<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    target: RebootTarget,
) -> Result<()> {
    warn!("Rebooting {} ({:?})", serial, target);
    bridge.execute(Some(serial), target.args()).await?;
    Ok(())
}

/// Run a [`DeviceAction`], returning the label to report
pub async fn run_device_action<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    action: DeviceAction,
) -> Result<String> {
    match action {
        DeviceAction::Mirror => bridge.launch_mirror(serial).await.map(|_| action.label().to_string()),
        DeviceAction::ToggleWifi => toggle_wifi(bridge, serial).await,
        DeviceAction::ToggleScreen => toggle_screen(bridge, serial)
            .await
            .map(|_| action.label().to_string()),
        DeviceAction::Reboot(target) => reboot(bridge, serial, target)
            .await
            .map(|_| action.label().to_string()),
    }
}
