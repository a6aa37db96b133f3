//! Per-device advertisement keys and the cheap plausibility check.
//!
//! Each physical Victron device has a 16-byte AES key, provisioned
//! out-of-band as a hex string and bound to the device's gate at
//! construction. The string is kept verbatim and decoded lazily: a
//! malformed key must surface as a per-frame rejection when it is first
//! needed, never as a construction-time failure.

use core::fmt;

use crate::advertisement::parse_envelope;
use crate::error::{Error, Result};

/// A hex-encoded advertisement key for one device.
#[derive(Clone, PartialEq, Eq)]
pub struct AdvertisementKey {
    hex: String,
}

impl AdvertisementKey {
    /// Wrap a hex-encoded key string. No validation happens here.
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        Self { hex: hex.into() }
    }

    /// The hex string as supplied.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// Decode the key to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the string is not valid hex or
    /// decodes to zero bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes =
            hex::decode(&self.hex).map_err(|e| Error::InvalidKey(e.to_string()))?;
        if bytes.is_empty() {
            return Err(Error::InvalidKey("key is empty".into()));
        }
        Ok(bytes)
    }

    /// The key's first byte, used by the plausibility check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the string is not valid hex or is
    /// empty.
    pub fn first_byte(&self) -> Result<u8> {
        // to_bytes guarantees at least one byte
        Ok(self.to_bytes()?[0])
    }

    /// Check whether this key is plausible for an instant-readout payload.
    ///
    /// Decodes only the envelope and compares the first encrypted byte
    /// against the key's first byte: the only check possible without a
    /// full decrypt, and enough to catch the dominant operational failure
    /// (a device configured with the wrong key) cheaply.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is too short for an envelope or the
    /// key itself is unusable; `Ok(false)` means the key does not match.
    pub fn matches(&self, payload: &[u8]) -> Result<bool> {
        let first = self.first_byte()?;
        let envelope = parse_envelope(payload)?;
        Ok(envelope.encrypted.first() == Some(&first))
    }
}

// Key material stays out of logs; only the length is shown.
impl fmt::Debug for AdvertisementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvertisementKey")
            .field("hex_len", &self.hex.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "aabbccddeeff00112233445566778899";

    fn payload_with_first_encrypted_byte(byte: u8) -> Vec<u8> {
        vec![0x10, 0x00, 0xA1, 0x02, 0x02, 0x34, 0x12, byte, 0x01, 0x02]
    }

    #[test]
    fn test_first_byte() {
        let key = AdvertisementKey::new(KEY);
        assert_eq!(key.first_byte().unwrap(), 0xAA);
    }

    #[test]
    fn test_malformed_hex() {
        let key = AdvertisementKey::new("not hex at all");
        assert!(matches!(key.first_byte(), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_empty_key() {
        let key = AdvertisementKey::new("");
        assert!(matches!(key.first_byte(), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_matches() {
        let key = AdvertisementKey::new(KEY);
        assert!(key.matches(&payload_with_first_encrypted_byte(0xAA)).unwrap());
        assert!(!key.matches(&payload_with_first_encrypted_byte(0xAB)).unwrap());
    }

    #[test]
    fn test_matches_short_payload() {
        let key = AdvertisementKey::new(KEY);
        assert!(key.matches(&[0x10, 0x00]).is_err());
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let key = AdvertisementKey::new(KEY);
        let debug = format!("{key:?}");
        assert!(!debug.contains("aabb"));
        assert!(debug.contains("hex_len"));
    }
}
