//! Gate and normalizer for Victron BLE instant-readout telemetry.
//!
//! This crate turns raw manufacturer-data frames from Victron
//! battery/power-monitoring devices into a uniform stream of
//! `(key, unit, device-class, value)` observations for a home-automation
//! sink, across seven device families:
//!
//! | Family | Examples |
//! |--------|----------|
//! | BatteryMonitor | SmartShunt, BMV-712 |
//! | DcDcConverter | Orion Smart |
//! | DcEnergyMeter | SmartShunt in meter mode |
//! | SolarCharger | SmartSolar MPPT |
//! | SmartBatteryProtect | Smart BatteryProtect |
//! | SmartLithium | Smart Lithium batteries |
//! | VEBus | MultiPlus, Quattro |
//!
//! The pipeline per frame: filter non-Victron traffic, detect the family
//! from the payload alone, check the advertisement key cheaply against the
//! envelope, decode through a [`RecordDecoder`], and normalize the record
//! into its family's fixed observation table. Every failure is recovered
//! locally; a bad frame never takes down the scan loop.
//!
//! Decryption itself is not implemented here: plug a decoder into the seam,
//! or use [`MockDecoder`] in tests.
//!
//! # Quick start
//!
//! ```
//! use victron_core::{AdvertisementKey, DeviceGate, MemorySink, MockDecoder, RawFrame};
//! use victron_types::SensorKey;
//!
//! // One gate per physical device, key bound at construction.
//! let gate = DeviceGate::with_key(
//!     MockDecoder::new(),
//!     AdvertisementKey::new("aabbccddeeff00112233445566778899"),
//! );
//!
//! // A battery monitor frame whose first encrypted byte matches the key.
//! let payload = vec![0x10, 0x00, 0xA1, 0x02, 0x02, 0x34, 0x12, 0xAA, 0x5D, 0x3E];
//! let frame = RawFrame::victron(payload, Some("SmartShunt".into()));
//!
//! let mut sink = MemorySink::new();
//! let outcome = gate.process(&frame, &mut sink);
//! assert!(outcome.is_published());
//! assert_eq!(sink.device_type.as_deref(), Some("BatteryMonitor"));
//! assert!(sink.observation(SensorKey::Alarm).is_some());
//! ```

pub mod advertisement;
pub mod decoder;
pub mod error;
pub mod frame;
pub mod gate;
pub mod key;
pub mod mock;
pub mod monitor;
pub mod normalize;
pub mod observation;
pub mod scan;
pub mod sink;

// Core exports
pub use advertisement::{Envelope, detect_family, parse_envelope};
pub use decoder::RecordDecoder;
pub use error::{DecodeError, Error, RejectReason, Result};
pub use frame::RawFrame;
pub use gate::{DeviceGate, Outcome};
pub use key::AdvertisementKey;
pub use mock::MockDecoder;
pub use monitor::{MonitorOptions, PassiveMonitor, TelemetryUpdate};
pub use normalize::{NO_ALARM, normalize};
pub use observation::{Observation, Value};
pub use scan::{DiscoveredDevice, ScanOptions, scan_for_devices, scan_with_options};
pub use sink::{MemorySink, SensorSink};

// Re-export from victron-types
pub use victron_types::{DecodedRecord, DeviceClass, DeviceFamily, SensorKey, Unit};
