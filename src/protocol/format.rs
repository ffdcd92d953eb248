//! Wire format codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Byte encoding of a single value on the wire.
///
/// Chosen by the server per column (RowDescription) and by the client per
/// parameter (Bind). Not a property of the type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// Human-readable text form
    #[default]
    Text,
    /// Type-specific packed form, network byte order
    Binary,
}

impl WireFormat {
    /// Format code as written in Bind / RowDescription.
    pub fn code(self) -> i16 {
        match self {
            WireFormat::Text => 0,
            WireFormat::Binary => 1,
        }
    }

    /// Parse a format code. Unknown codes are rejected rather than defaulted.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(WireFormat::Text),
            1 => Some(WireFormat::Binary),
            _ => None,
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Text => write!(f, "text"),
            WireFormat::Binary => write!(f, "binary"),
        }
    }
}

impl FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(WireFormat::Text),
            "binary" => Ok(WireFormat::Binary),
            other => Err(format!("unknown wire format '{}' (expected text or binary)", other)),
        }
    }
}
