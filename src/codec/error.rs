//! Transcoding errors.
//!
//! Every decode or encode call returns exactly one outcome. Nothing here
//! panics, logs, or retries; abort-vs-continue is the caller's decision.

use std::fmt;

use thiserror::Error;

use crate::protocol::{Oid, WireFormat, oid_to_name};

/// Why a value could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Bytes do not match the type's grammar (or binary width).
    Malformed,
    /// Well-formed number outside the target width's range.
    RangeOverflow,
}

/// Structured decode failure: kind, expected type and offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    /// Type name the decoder expected, e.g. `int4`.
    pub expected: &'static str,
    /// Offending input: lossy UTF-8 for text, `\x`-prefixed hex for binary.
    pub value: String,
}

impl DecodeError {
    pub fn malformed(expected: &'static str, raw: &[u8]) -> Self {
        Self {
            kind: DecodeErrorKind::Malformed,
            expected,
            value: String::from_utf8_lossy(raw).into_owned(),
        }
    }

    pub fn overflow(expected: &'static str, raw: &[u8]) -> Self {
        Self {
            kind: DecodeErrorKind::RangeOverflow,
            expected,
            value: String::from_utf8_lossy(raw).into_owned(),
        }
    }

    /// Malformed binary input, rendered as bytea hex.
    pub fn malformed_binary(expected: &'static str, raw: &[u8]) -> Self {
        Self {
            kind: DecodeErrorKind::Malformed,
            expected,
            value: format!("\\x{}", hex::encode(raw)),
        }
    }

    pub fn is_overflow(&self) -> bool {
        self.kind == DecodeErrorKind::RangeOverflow
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DecodeErrorKind::Malformed => {
                write!(f, "invalid {} value: {:?}", self.expected, self.value)
            }
            DecodeErrorKind::RangeOverflow => {
                write!(f, "{} value out of range: {:?}", self.expected, self.value)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Errors that can occur while encoding a value for binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The value's variant cannot be represented as the target type.
    #[error("cannot encode {found} value as {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Narrowing conversion would lose the value.
    #[error("{expected} value out of range: {value}")]
    RangeOverflow { expected: &'static str, value: String },

    /// A string value contains a literal NULL byte (0x00).
    #[error("Value contains NULL byte (0x00) which is invalid in PostgreSQL")]
    NullByte,

    /// Payload longer than a Bind length field can describe.
    #[error("parameter of {len} bytes exceeds the i32 length field")]
    TooLarge { len: usize },
}

/// Registry-level failures: lookup, format dispatch, or the codec itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    /// No transcoder registered for this oid.
    #[error("no transcoder registered for {}", describe_oid(*oid))]
    LookupMiss { oid: Oid },

    /// Transcoder exists but has no decoder for the requested format.
    #[error("{} has no {format} decoder", describe_oid(*oid))]
    UnsupportedFormat { oid: Oid, format: WireFormat },

    /// Transcoder exists but cannot encode parameters.
    #[error("{} has no encoder", describe_oid(*oid))]
    NotEncodable { oid: Oid },

    /// Transcoder cannot write the requested format.
    #[error("{} cannot be encoded as {format}", describe_oid(*oid))]
    UnsupportedEncodeFormat { oid: Oid, format: WireFormat },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl TranscodeError {
    /// True when the failure means "unknown type" rather than bad data.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, TranscodeError::LookupMiss { .. })
    }
}

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("transcoder for oid {oid} has neither a text nor a binary decoder")]
    NoDecoder { oid: Oid },
}

fn describe_oid(oid: Oid) -> String {
    match oid_to_name(oid) {
        Some(name) => format!("oid {} ({})", oid, name),
        None => format!("oid {}", oid),
    }
}
