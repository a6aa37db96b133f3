//! Error types for victron-core.
//!
//! Two distinct families of failure exist here and they deliberately do not
//! share a type:
//!
//! - [`Error`] — faults from the BLE transport layer (adapter missing, scan
//!   failures) and from explicit envelope/key inspection entry points.
//!   These surface to callers of the scan and monitor APIs.
//! - [`RejectReason`] — per-frame outcomes inside the advertisement gate.
//!   A rejected frame is not a fault: the gate logs it and reports it in
//!   its return value, and nothing propagates. A single malformed frame
//!   must never take down a scan loop.

use thiserror::Error;

/// Errors that can occur in the scan/monitor layer or when inspecting
/// advertisement data directly.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Bluetooth Low Energy error.
    #[error("Bluetooth error: {0}")]
    Bluetooth(#[from] btleplug::Error),

    /// No Bluetooth adapter available.
    #[error("no Bluetooth adapter available")]
    NoAdapter,

    /// The advertisement key is not usable (bad hex, empty).
    #[error("invalid advertisement key: {0}")]
    InvalidKey(String),

    /// Failed to parse advertisement data.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias using victron-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a decoder failed to produce a record from an encrypted payload.
///
/// Raised by [`RecordDecoder`](crate::decoder::RecordDecoder)
/// implementations; the gate converts it into a frame rejection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Payload decrypted to garbage or an impossible field value.
    #[error("corrupt payload: {0}")]
    Corrupt(String),

    /// Payload is shorter than the family's field layout.
    #[error("payload truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Expected data size.
        expected: usize,
        /// Actual data size received.
        actual: usize,
    },
}

/// Why the advertisement gate dropped a frame.
///
/// Every variant is fully recovered inside
/// [`DeviceGate::process`](crate::gate::DeviceGate::process); this type
/// exists so callers and tests can observe which stage rejected the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RejectReason {
    /// Payload too short to sniff, or its record kind is not a supported
    /// family.
    UnsupportedRecord,
    /// No advertisement key was configured for this device.
    MissingKey,
    /// The configured key is not valid hex (or is empty).
    MalformedKey,
    /// The key's first byte does not match the encrypted payload.
    KeyMismatch,
    /// Full decode failed after the key check passed.
    DecodeFailed,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedRecord => write!(f, "unsupported advertisement record"),
            Self::MissingKey => write!(f, "advertisement key not set"),
            Self::MalformedKey => write!(f, "advertisement key is not valid hex"),
            Self::KeyMismatch => write!(f, "advertisement key does not match"),
            Self::DecodeFailed => write!(f, "unable to decode record"),
        }
    }
}
