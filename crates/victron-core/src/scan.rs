//! Device discovery and scanning.
//!
//! One-shot discovery of Victron devices advertising instant-readout
//! records. This is the operator-facing half of the transport layer: it
//! answers "which Victron devices are in range, and what are they?"
//! without needing any keys. Continuous processing lives in
//! [`crate::monitor`].

use std::time::Duration;

use btleplug::api::{Central, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, PeripheralId};
use tokio::time::sleep;
use tracing::debug;

use victron_types::DeviceFamily;
use victron_types::ble::{INSTANT_READOUT_PREFIX, MANUFACTURER_ID};

use crate::advertisement::{detect_family, parse_envelope};
use crate::error::{Error, Result};

/// A Victron device seen during a scan.
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    /// The device name (e.g. "SmartShunt HQ2231").
    pub name: Option<String>,
    /// The BLE address as a string (may be zeros on macOS; use
    /// `identifier` instead).
    pub address: String,
    /// Stable identifier: the address, or the peripheral ID on platforms
    /// that hide addresses.
    pub identifier: String,
    /// RSSI signal strength.
    pub rssi: Option<i16>,
    /// Detected family, when the record kind is a supported one.
    pub family: Option<DeviceFamily>,
    /// Model id from the envelope, when the payload parses.
    pub model_id: Option<u16>,
    /// The raw instant-readout payload, for key checks.
    pub payload: Vec<u8>,
}

/// Options for scanning.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// How long to scan for devices.
    pub duration: Duration,
    /// Only return devices whose record kind is a supported family.
    pub supported_families_only: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(5),
            supported_families_only: false,
        }
    }
}

impl ScanOptions {
    /// Create new scan options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scan duration.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set scan duration in seconds.
    #[must_use]
    pub fn duration_secs(mut self, secs: u64) -> Self {
        self.duration = Duration::from_secs(secs);
        self
    }

    /// Only keep devices of supported families.
    #[must_use]
    pub fn supported_families_only(mut self, filter: bool) -> Self {
        self.supported_families_only = filter;
        self
    }
}

/// Format a peripheral ID as a plain string.
pub fn format_peripheral_id(id: &PeripheralId) -> String {
    format!("{id:?}")
        .trim_start_matches("PeripheralId(")
        .trim_end_matches(')')
        .to_string()
}

/// Create a stable device identifier from an address and peripheral ID.
///
/// On macOS where addresses read 00:00:00:00:00:00, the peripheral ID is
/// the only stable handle.
pub fn create_identifier(address: &str, peripheral_id: &PeripheralId) -> String {
    if address == "00:00:00:00:00:00" {
        format_peripheral_id(peripheral_id)
    } else {
        address.to_string()
    }
}

/// Get the first available Bluetooth adapter.
///
/// # Errors
///
/// Returns [`Error::NoAdapter`] when the platform reports none.
pub async fn get_adapter() -> Result<Adapter> {
    let manager = Manager::new().await?;
    let adapters = manager.adapters().await?;

    adapters.into_iter().next().ok_or(Error::NoAdapter)
}

/// Scan for Victron devices with default options.
///
/// Returns a list of discovered devices; an empty list means none were
/// found, which is not an error.
///
/// # Errors
///
/// Returns an error if no adapter is available or the scan could not be
/// started or stopped.
pub async fn scan_for_devices() -> Result<Vec<DiscoveredDevice>> {
    scan_with_options(ScanOptions::default()).await
}

/// Scan for Victron devices with custom options.
///
/// # Errors
///
/// See [`scan_for_devices`].
pub async fn scan_with_options(options: ScanOptions) -> Result<Vec<DiscoveredDevice>> {
    let adapter = get_adapter().await?;
    scan_with_adapter(&adapter, options).await
}

/// Scan using a specific adapter.
///
/// # Errors
///
/// See [`scan_for_devices`].
pub async fn scan_with_adapter(
    adapter: &Adapter,
    options: ScanOptions,
) -> Result<Vec<DiscoveredDevice>> {
    adapter.start_scan(ScanFilter::default()).await?;
    sleep(options.duration).await;
    adapter.stop_scan().await?;

    let mut devices = Vec::new();
    for peripheral in adapter.peripherals().await? {
        let Ok(Some(props)) = peripheral.properties().await else {
            continue;
        };
        let Some(payload) = props.manufacturer_data.get(&MANUFACTURER_ID) else {
            continue;
        };
        if payload.first() != Some(&INSTANT_READOUT_PREFIX) {
            debug!(
                name = props.local_name.as_deref().unwrap_or("unknown"),
                "skipping Victron device without instant-readout data"
            );
            continue;
        }

        let family = detect_family(payload);
        if options.supported_families_only && family.is_none() {
            continue;
        }

        let address = props.address.to_string();
        devices.push(DiscoveredDevice {
            name: props.local_name.clone(),
            identifier: create_identifier(&address, &peripheral.id()),
            address,
            rssi: props.rssi,
            family,
            model_id: parse_envelope(payload).ok().map(|e| e.model_id),
            payload: payload.clone(),
        });
    }

    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_options_default() {
        let opts = ScanOptions::default();
        assert_eq!(opts.duration, Duration::from_secs(5));
        assert!(!opts.supported_families_only);
    }

    #[test]
    fn test_scan_options_builder() {
        let opts = ScanOptions::new()
            .duration_secs(12)
            .supported_families_only(true);
        assert_eq!(opts.duration, Duration::from_secs(12));
        assert!(opts.supported_families_only);
    }
}
