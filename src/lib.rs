//! # pg-transcode
//!
//! PostgreSQL value transcoding: the per-value decode/encode layer of a
//! wire-protocol client.
//!
//! A result row hands over raw bytes plus the column's type oid and format;
//! the [`TypeRegistry`] turns them into a typed [`PgValue`]. For parameter
//! binding it writes values back in each type's preferred wire format.
//!
//! ```
//! use pg_transcode::{TypeRegistry, PgValue, WireFormat};
//!
//! let registry = TypeRegistry::with_builtins();
//! let value = registry.decode(23, WireFormat::Text, b"42").unwrap();
//! assert_eq!(value, PgValue::Int4(42));
//!
//! // unknown types are a lookup miss, not a decode failure
//! let err = registry.decode(9999, WireFormat::Text, b"42").unwrap_err();
//! assert!(err.is_lookup_miss());
//! ```

pub mod codec;
pub mod config;
pub mod protocol;

pub use codec::{
    DecodeError, DecodeErrorKind, EncodeError, PgValue, RegistryError, TranscodeError,
    Transcoder, TypeRegistry,
};
pub use config::{ConfigError, RegistryConfig};
pub use protocol::{Oid, WireFormat};
