//! Instant-readout envelope parsing and device-family detection.
//!
//! Everything here is plain byte inspection of the unencrypted container;
//! no key is needed. The encrypted remainder is handed to a
//! [`RecordDecoder`](crate::decoder::RecordDecoder) untouched.
//!
//! # Envelope format
//!
//! - bytes 0-1: record prefix (u16 LE, low byte `0x10` = instant readout)
//! - bytes 2-3: model id (u16 LE)
//! - byte 4: record kind (selects the device family)
//! - bytes 5-6: nonce / data counter (u16 LE)
//! - bytes 7..: encrypted payload; per the Victron protocol its first byte
//!   equals the first byte of the device's encryption key, which is what
//!   makes the cheap key-plausibility check possible.

use bytes::Buf;

use victron_types::DeviceFamily;
use victron_types::ble::MIN_ENVELOPE_BYTES;

use crate::error::{Error, Result};

/// The unencrypted container of an instant-readout advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    /// Victron model identifier.
    pub model_id: u16,
    /// Record-kind byte; see [`DeviceFamily::from_record_kind`].
    pub record_kind: u8,
    /// Per-frame nonce / data counter.
    pub nonce: u16,
    /// Encrypted payload (at least one byte).
    pub encrypted: &'a [u8],
}

/// Split an instant-readout payload into its envelope.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if `payload` contains fewer than
/// [`MIN_ENVELOPE_BYTES`] (8) bytes.
#[must_use = "parsing returns a Result that should be handled"]
pub fn parse_envelope(payload: &[u8]) -> Result<Envelope<'_>> {
    if payload.len() < MIN_ENVELOPE_BYTES {
        return Err(Error::InvalidData(format!(
            "envelope requires {} bytes, got {}",
            MIN_ENVELOPE_BYTES,
            payload.len()
        )));
    }

    let mut buf = payload;
    let _prefix = buf.get_u16_le();
    let model_id = buf.get_u16_le();
    let record_kind = buf.get_u8();
    let nonce = buf.get_u16_le();

    Ok(Envelope {
        model_id,
        record_kind,
        nonce,
        encrypted: buf,
    })
}

/// Detect the device family of an instant-readout payload.
///
/// Returns `None` when the payload is too short to carry an envelope or
/// when its record kind is not one of the seven supported families. Both
/// cases are handled identically downstream: the frame is dropped with a
/// debug diagnostic.
#[must_use]
pub fn detect_family(payload: &[u8]) -> Option<DeviceFamily> {
    if payload.len() < MIN_ENVELOPE_BYTES {
        return None;
    }
    DeviceFamily::from_record_kind(payload[4])
}
