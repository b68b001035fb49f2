//! # Error Types: Structured Error Hierarchy
//!
//! Defines the leaf error types for identity construction, canonical
//! encoding, and opaque metadata parsing. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Length mismatches on identities carry the observed length.
//! - Encoder range errors carry both the value and the bound it exceeded.
//! - Metadata errors name the field and the JSON type that was found.

use thiserror::Error;

/// Error constructing a fixed-size identity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// An asset id must be exactly 32 bytes.
    #[error("wrong byte-length for asset id: expected 32, got {0}")]
    BadAssetLength(usize),

    /// A hash must be exactly 32 bytes.
    #[error("wrong byte-length for hash: expected 32, got {0}")]
    BadHashLength(usize),

    /// The text form was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Error in the canonical varint/varstr encoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The value exceeds the encoding's range.
    #[error("value {value} out of range (max {max})")]
    Range {
        /// The rejected value.
        value: u64,
        /// The largest value the encoding accepts.
        max: u64,
    },

    /// The input ended in the middle of a value.
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),

    /// A varint ran past 64 bits.
    #[error("varint overflows 64 bits at offset {0}")]
    Overflow(usize),
}

/// Error parsing opaque item metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The field must be a JSON object (or absent/null).
    #[error("{field} must be a JSON object, got {found}")]
    NotAnObject {
        /// Name of the offending field.
        field: &'static str,
        /// JSON type that was supplied instead.
        found: &'static str,
    },
}

/// Error during canonical JSON serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
