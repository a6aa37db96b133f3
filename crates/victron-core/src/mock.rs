//! Mock decoder for testing without key material or real hardware.
//!
//! [`MockDecoder`] implements [`RecordDecoder`] with canned records,
//! failure injection, and optional key assertions, so gate and pipeline
//! behavior can be exercised end-to-end in unit tests.

use std::sync::atomic::{AtomicU32, Ordering};

use victron_types::record::{
    BatteryMonitorRecord, DcDcConverterRecord, DcEnergyMeterRecord, SmartBatteryProtectRecord,
    SmartLithiumRecord, SolarChargerRecord, VeBusRecord,
};
use victron_types::{DecodedRecord, DeviceFamily};

use crate::decoder::RecordDecoder;
use crate::error::DecodeError;

/// A decoder that returns canned records.
///
/// By default it produces an empty record of whatever family is requested.
/// Tests can pin a specific record, make every decode fail, or assert the
/// key bytes the gate hands over.
///
/// # Example
///
/// ```
/// use victron_core::{DeviceGate, MockDecoder, MemorySink, RawFrame, AdvertisementKey};
/// use victron_types::record::SolarChargerRecord;
/// use victron_types::DecodedRecord;
///
/// let decoder = MockDecoder::new()
///     .with_record(DecodedRecord::SolarCharger(SolarChargerRecord::default()));
/// let gate = DeviceGate::with_key(decoder, AdvertisementKey::new("aa00"));
///
/// let payload = vec![0x10, 0x00, 0xA1, 0x02, 0x01, 0x00, 0x00, 0xAA];
/// let mut sink = MemorySink::new();
/// let outcome = gate.process(&RawFrame::victron(payload, None), &mut sink);
/// assert!(outcome.is_published());
/// ```
#[derive(Debug, Default)]
pub struct MockDecoder {
    record: Option<DecodedRecord>,
    fail_message: Option<String>,
    expected_key: Option<Vec<u8>>,
    decode_count: AtomicU32,
}

impl MockDecoder {
    /// Create a decoder that succeeds with empty records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Always return this record, regardless of the requested family.
    #[must_use]
    pub fn with_record(mut self, record: DecodedRecord) -> Self {
        self.record = Some(record);
        self
    }

    /// Fail every decode with the given message.
    #[must_use]
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.fail_message = Some(message.into());
        self
    }

    /// Fail any decode whose key bytes differ from `key`.
    #[must_use]
    pub fn expecting_key(mut self, key: Vec<u8>) -> Self {
        self.expected_key = Some(key);
        self
    }

    /// How many times `decode` has been called.
    #[must_use]
    pub fn decode_count(&self) -> u32 {
        self.decode_count.load(Ordering::Relaxed)
    }

    fn empty_record(family: DeviceFamily) -> DecodedRecord {
        match family {
            DeviceFamily::BatteryMonitor => {
                DecodedRecord::BatteryMonitor(BatteryMonitorRecord::default())
            }
            DeviceFamily::DcDcConverter => {
                DecodedRecord::DcDcConverter(DcDcConverterRecord::default())
            }
            DeviceFamily::DcEnergyMeter => {
                DecodedRecord::DcEnergyMeter(DcEnergyMeterRecord::default())
            }
            DeviceFamily::SmartBatteryProtect => {
                DecodedRecord::SmartBatteryProtect(SmartBatteryProtectRecord::default())
            }
            DeviceFamily::SmartLithium => {
                DecodedRecord::SmartLithium(SmartLithiumRecord::default())
            }
            DeviceFamily::SolarCharger => {
                DecodedRecord::SolarCharger(SolarChargerRecord::default())
            }
            DeviceFamily::VeBus => DecodedRecord::VeBus(VeBusRecord::default()),
        }
    }
}

impl RecordDecoder for MockDecoder {
    fn decode(
        &self,
        family: DeviceFamily,
        _payload: &[u8],
        key: &[u8],
    ) -> Result<DecodedRecord, DecodeError> {
        self.decode_count.fetch_add(1, Ordering::Relaxed);

        if let Some(message) = &self.fail_message {
            return Err(DecodeError::Corrupt(message.clone()));
        }
        if let Some(expected) = &self.expected_key {
            if expected != key {
                return Err(DecodeError::Corrupt("unexpected key bytes".into()));
            }
        }

        Ok(self
            .record
            .clone()
            .unwrap_or_else(|| Self::empty_record(family)))
    }
}
