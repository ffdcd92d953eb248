//! Value transcoding (Layer 2: pure, sync)
//!
//! Converts one field's raw bytes into a [`PgValue`] and back.
//! No I/O, no message framing, no logging on the decode path.
//!
//! - `text` / `binary`: per-type codecs for each wire format
//! - `builtins`: the scalar types known out of the box
//! - `registry`: oid → [`Transcoder`] dispatch

pub mod binary;
pub mod builtins;
mod convert;
pub mod error;
pub mod registry;
pub mod text;
pub mod transcoder;
pub mod value;

pub use error::{DecodeError, DecodeErrorKind, EncodeError, RegistryError, TranscodeError};
pub use registry::TypeRegistry;
pub use transcoder::{DecodeFn, EncodeFn, Transcoder};
pub use value::PgValue;
