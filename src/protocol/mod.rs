//! PostgreSQL wire vocabulary (pure, sync)
//!
//! Type identifiers and format codes shared by the codec layer.
//! No I/O, no message framing beyond what a single value needs.

pub mod format;
pub mod types;

pub use format::WireFormat;
pub use types::{Oid, name_to_oid, oid, oid_to_name};
