//! The decoder seam between the gate and the cryptographic layer.
//!
//! Family detection and envelope splitting are byte inspection and live in
//! [`crate::advertisement`]; what remains — AES-CTR decryption of the
//! envelope's payload and parsing of the decrypted per-family field layout
//! — is behind the [`RecordDecoder`] trait. This crate does not implement
//! cryptography; production integrations plug in a decoder backed by one,
//! and tests use [`MockDecoder`](crate::mock::MockDecoder).

use std::sync::Arc;

use victron_types::{DecodedRecord, DeviceFamily};

use crate::error::DecodeError;

/// Decrypts and parses the encrypted payload of an instant-readout
/// advertisement into a typed record.
pub trait RecordDecoder {
    /// Decode one payload.
    ///
    /// `payload` is the full manufacturer data (envelope included), exactly
    /// as received; `key` is the device's raw AES key bytes, already
    /// hex-decoded and plausibility-checked by the gate.
    ///
    /// The returned record's [`family()`](DecodedRecord::family) must equal
    /// `family`; the gate dispatches normalization on the record itself.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the payload decrypts to garbage or is
    /// shorter than the family's field layout. The gate treats any error
    /// as a frame rejection, never a fault.
    fn decode(
        &self,
        family: DeviceFamily,
        payload: &[u8],
        key: &[u8],
    ) -> Result<DecodedRecord, DecodeError>;
}

impl<D: RecordDecoder + ?Sized> RecordDecoder for &D {
    fn decode(
        &self,
        family: DeviceFamily,
        payload: &[u8],
        key: &[u8],
    ) -> Result<DecodedRecord, DecodeError> {
        (**self).decode(family, payload, key)
    }
}

impl<D: RecordDecoder + ?Sized> RecordDecoder for Arc<D> {
    fn decode(
        &self,
        family: DeviceFamily,
        payload: &[u8],
        key: &[u8],
    ) -> Result<DecodedRecord, DecodeError> {
        (**self).decode(family, payload, key)
    }
}
