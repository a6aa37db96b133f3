//! BLE advertising constants for Victron devices.
//!
//! This module contains the manufacturer identifier and frame markers
//! needed to recognize Victron instant-readout advertisements.

/// Victron Energy manufacturer ID for BLE advertisements.
pub const MANUFACTURER_ID: u16 = 0x02E1;

/// First payload byte of an instant-readout advertisement.
///
/// Victron radios broadcast several manufacturer-data record types; only
/// instant-readout records carry a full encrypted telemetry snapshot.
pub const INSTANT_READOUT_PREFIX: u8 = 0x10;

/// Minimum manufacturer-data length for an instant-readout envelope:
/// prefix (2 bytes) + model id (2) + record kind (1) + nonce (2) plus at
/// least one encrypted byte.
pub const MIN_ENVELOPE_BYTES: usize = 8;
