//! Device discovery and wireless pairing

use adbt_core::prelude::*;
use adbt_core::{Device, DeviceState};

use crate::bridge::{parse_lines, shell, DeviceBridge};

const MODEL_PROP: &str = "ro.product.model";
const RELEASE_PROP: &str = "ro.build.version.release";

/// Parse `adb devices` into (serial, state) pairs, skipping the header and
/// daemon chatter such as `* daemon started successfully`
pub fn parse_device_list(output: &str) -> Vec<(String, DeviceState)> {
    parse_lines(output)
        .into_iter()
        .filter(|line| !line.starts_with("List of devices") && !line.starts_with('*'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let serial = fields.next()?;
            let state = fields.next()?;
            Some((serial.to_string(), DeviceState::parse(state)))
        })
        .collect()
}

/// Read a single system property; empty on failure
pub async fn get_prop<B: DeviceBridge + ?Sized>(bridge: &B, serial: &str, prop: &str) -> String {
    match shell(bridge, serial, &["getprop", prop]).await {
        Ok(out) => out.trim().to_string(),
        Err(e) => {
            debug!("getprop {} on {} failed: {}", prop, serial, e);
            String::new()
        }
    }
}

/// List attached devices, enriching connected ones with model and release
pub async fn list_devices<B: DeviceBridge + ?Sized>(bridge: &B) -> Result<Vec<Device>> {
    let output = bridge.execute(None, &["devices"]).await?;

    let mut devices = Vec::new();
    for (serial, state) in parse_device_list(&output) {
        let mut device = Device::new(serial, state);
        if device.is_connected() {
            device.model = get_prop(bridge, &device.serial, MODEL_PROP).await;
            device.android_version = get_prop(bridge, &device.serial, RELEASE_PROP).await;
        }
        devices.push(device);
    }

    info!("Found {} device(s)", devices.len());
    Ok(devices)
}

/// Pair with a device over Wi-Fi (`adb pair host:port pin`)
pub async fn pair<B: DeviceBridge + ?Sized>(
    bridge: &B,
    address: &str,
    port: &str,
    pin: &str,
) -> Result<String> {
    let address = address.trim();
    let port = port.trim();
    let pin = pin.trim();
    if address.is_empty() || port.is_empty() || pin.is_empty() {
        return Err(Error::bridge("address, port and PIN are all required"));
    }

    let target = format!("{}:{}", address, port);
    let output = bridge.execute(None, &["pair", target.as_str(), pin]).await?;

    // Older adb releases exit 0 on a rejected code
    if output.to_lowercase().contains("failed") {
        return Err(Error::bridge(output.trim()));
    }
    Ok(output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeBridge;

    #[test]
    fn test_parse_device_list() {
        let output = "List of devices attached\n\
                      emulator-5554\tdevice\n\
                      R58M123\tunauthorized\n\
                      192.168.1.5:5555\toffline\n\n";
        let devices = parse_device_list(output);
        assert_eq!(devices.len(), 3);
        assert_eq!(devices[0], ("emulator-5554".into(), DeviceState::Device));
        assert_eq!(devices[1].1, DeviceState::Unauthorized);
        assert_eq!(devices[2].0, "192.168.1.5:5555");
    }

    #[test]
    fn test_parse_device_list_skips_daemon_chatter() {
        let output = "* daemon not running; starting now at tcp:5037\n\
                      * daemon started successfully\n\
                      List of devices attached\n";
        assert!(parse_device_list(output).is_empty());
    }

    #[tokio::test]
    async fn test_list_devices_reads_props_for_connected_only() {
        let bridge = FakeBridge::new()
            .respond(
                &["devices"],
                "List of devices attached\nabc\tdevice\ndef\toffline\n",
            )
            .respond(&["-s", "abc", "shell", "getprop", MODEL_PROP], "Pixel 8\n")
            .respond(&["-s", "abc", "shell", "getprop", RELEASE_PROP], "14\n");

        let devices = list_devices(&bridge).await.unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].model, "Pixel 8");
        assert_eq!(devices[0].android_version, "14");
        assert!(devices[1].model.is_empty());
        assert_eq!(bridge.calls_matching("getprop"), 2);
    }

    #[tokio::test]
    async fn test_pair_requires_all_fields() {
        let bridge = FakeBridge::new();
        tokio_test::assert_err!(pair(&bridge, "10.0.0.2", "", "123456").await);
        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pair_detects_failure_text() {
        let bridge = FakeBridge::new().respond(
            &["pair", "10.0.0.2:37000", "123456"],
            "Failed: Wrong password or connection was dropped.",
        );
        let err = pair(&bridge, "10.0.0.2", "37000", "123456").await.unwrap_err();
        assert!(err.to_string().contains("Wrong password"));
    }
}
