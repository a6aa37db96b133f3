//! Raw advertisement frames as delivered by a BLE scan callback.

use std::collections::HashMap;

use victron_types::ble::{INSTANT_READOUT_PREFIX, MANUFACTURER_ID};

/// One scan-delivered advertisement frame.
///
/// Built once per scan callback and never mutated. The manufacturer-data
/// map is keyed by 16-bit manufacturer identifier exactly as the BLE stack
/// delivers it; anything not registered under the Victron identifier is
/// someone else's traffic.
#[derive(Debug, Clone, Default)]
pub struct RawFrame {
    /// Manufacturer-data payloads keyed by manufacturer identifier.
    pub manufacturer_data: HashMap<u16, Vec<u8>>,
    /// Device name declared in the advertisement, if any.
    pub name: Option<String>,
    /// Manufacturer name declared in the advertisement, if any.
    pub manufacturer: Option<String>,
}

impl RawFrame {
    /// Create a frame from a manufacturer-data map and declared names.
    #[must_use]
    pub fn new(
        manufacturer_data: HashMap<u16, Vec<u8>>,
        name: Option<String>,
        manufacturer: Option<String>,
    ) -> Self {
        Self {
            manufacturer_data,
            name,
            manufacturer,
        }
    }

    /// Convenience constructor for a frame carrying one Victron payload.
    #[must_use]
    pub fn victron(payload: Vec<u8>, name: Option<String>) -> Self {
        let mut manufacturer_data = HashMap::new();
        manufacturer_data.insert(MANUFACTURER_ID, payload);
        Self {
            manufacturer_data,
            name,
            manufacturer: None,
        }
    }

    /// The payload registered under the Victron manufacturer identifier.
    #[must_use]
    pub fn victron_payload(&self) -> Option<&[u8]> {
        self.manufacturer_data
            .get(&MANUFACTURER_ID)
            .map(Vec::as_slice)
    }

    /// True when the Victron payload starts with the instant-readout marker.
    ///
    /// Frames failing this check are filtered, not rejected: most BLE
    /// traffic in range is irrelevant and must be discarded silently.
    #[must_use]
    pub fn is_instant_readout(&self) -> bool {
        self.victron_payload()
            .and_then(|payload| payload.first())
            .is_some_and(|first| *first == INSTANT_READOUT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_victron_payload_lookup() {
        let frame = RawFrame::victron(vec![0x10, 0x02, 0x00], Some("SmartShunt".into()));
        assert_eq!(frame.victron_payload(), Some(&[0x10, 0x02, 0x00][..]));
        assert!(frame.is_instant_readout());
    }

    #[test]
    fn test_foreign_manufacturer_is_ignored() {
        let mut data = HashMap::new();
        data.insert(0x0702u16, vec![0x10, 0x01]);
        let frame = RawFrame::new(data, None, None);
        assert!(frame.victron_payload().is_none());
        assert!(!frame.is_instant_readout());
    }

    #[test]
    fn test_non_instant_readout_marker() {
        let frame = RawFrame::victron(vec![0x01, 0x02, 0x03], None);
        assert!(frame.victron_payload().is_some());
        assert!(!frame.is_instant_readout());
    }

    #[test]
    fn test_empty_payload() {
        let frame = RawFrame::victron(Vec::new(), None);
        assert!(!frame.is_instant_readout());
    }
}
