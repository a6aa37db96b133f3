//! Rendering of scan results for the terminal.

use serde::Serialize;

use victron_core::DiscoveredDevice;

/// JSON-friendly view of a discovered device.
#[derive(Serialize)]
struct DeviceRow<'a> {
    name: Option<&'a str>,
    identifier: &'a str,
    rssi: Option<i16>,
    family: Option<&'static str>,
    model_id: Option<u16>,
}

impl<'a> From<&'a DiscoveredDevice> for DeviceRow<'a> {
    fn from(device: &'a DiscoveredDevice) -> Self {
        Self {
            name: device.name.as_deref(),
            identifier: &device.identifier,
            rssi: device.rssi,
            family: device.family.map(|f| f.label()),
            model_id: device.model_id,
        }
    }
}

/// Render devices as human-readable lines.
pub fn render_text(devices: &[DiscoveredDevice]) -> String {
    if devices.is_empty() {
        return "No Victron devices found.".to_string();
    }

    let mut out = String::new();
    for device in devices {
        let family = device
            .family
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unsupported record".to_string());
        let rssi = device
            .rssi
            .map(|r| format!("{r} dBm"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<24} {:<20} {:<22} {}\n",
            device.name.as_deref().unwrap_or("(no name)"),
            device.identifier,
            family,
            rssi,
        ));
    }
    out
}

/// Render devices as a JSON array.
pub fn render_json(devices: &[DiscoveredDevice]) -> anyhow::Result<String> {
    let rows: Vec<DeviceRow<'_>> = devices.iter().map(DeviceRow::from).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use victron_core::DeviceFamily;

    fn device() -> DiscoveredDevice {
        DiscoveredDevice {
            name: Some("SmartShunt HQ2231".into()),
            address: "ED:13:09:B6:27:40".into(),
            identifier: "ED:13:09:B6:27:40".into(),
            rssi: Some(-61),
            family: Some(DeviceFamily::BatteryMonitor),
            model_id: Some(0x02A1),
            payload: vec![0x10, 0x00, 0xA1, 0x02, 0x02, 0x00, 0x00, 0xAA],
        }
    }

    #[test]
    fn test_render_text() {
        let out = render_text(&[device()]);
        assert!(out.contains("SmartShunt HQ2231"));
        assert!(out.contains("Battery Monitor"));
        assert!(out.contains("-61 dBm"));
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&[]), "No Victron devices found.");
    }

    #[test]
    fn test_render_json() {
        let out = render_json(&[device()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["family"], "BatteryMonitor");
        assert_eq!(parsed[0]["rssi"], -61);
    }
}
