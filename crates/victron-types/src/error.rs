//! Error types for data parsing in victron-types.

use thiserror::Error;

/// Errors that can occur when interpreting Victron record data.
///
/// This error type is platform-agnostic and does not include BLE-specific
/// errors (those belong in victron-core).
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The record-kind byte does not name a supported device family.
    #[error("unknown record kind: 0x{0:02X}")]
    UnknownRecordKind(u8),

    /// Failed to interpret record data.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias using victron-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
