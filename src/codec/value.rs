//! Decoded native values.

use std::fmt;

use serde::Serialize;

use super::text;

/// A decoded column value.
///
/// One variant per native type the built-in transcoders produce. Custom
/// transcoders registered by applications map onto the same set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PgValue {
    Bool(bool),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Float8(f64),
    Oid(u32),
    Text(String),
}

impl PgValue {
    /// Name of the native type held, used in mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PgValue::Bool(_) => "bool",
            PgValue::Int2(_) => "int2",
            PgValue::Int4(_) => "int4",
            PgValue::Int8(_) => "int8",
            PgValue::Float4(_) => "float4",
            PgValue::Float8(_) => "float8",
            PgValue::Oid(_) => "oid",
            PgValue::Text(_) => "text",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of any integer variant, widened to i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PgValue::Int2(n) => Some(i64::from(*n)),
            PgValue::Int4(n) => Some(i64::from(*n)),
            PgValue::Int8(n) => Some(*n),
            PgValue::Oid(n) => Some(i64::from(*n)),
            _ => None,
        }
    }

    /// Float view of either float variant, widened to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PgValue::Float4(n) => Some(f64::from(*n)),
            PgValue::Float8(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PgValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the PostgreSQL text form of the value.
impl fmt::Display for PgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgValue::Bool(true) => f.write_str("t"),
            PgValue::Bool(false) => f.write_str("f"),
            PgValue::Int2(n) => write!(f, "{}", n),
            PgValue::Int4(n) => write!(f, "{}", n),
            PgValue::Int8(n) => write!(f, "{}", n),
            PgValue::Float4(n) => f.write_str(text::float4_text(&mut ryu::Buffer::new(), *n)),
            PgValue::Float8(n) => f.write_str(text::float8_text(&mut ryu::Buffer::new(), *n)),
            PgValue::Oid(n) => write!(f, "{}", n),
            PgValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for PgValue {
    fn from(v: bool) -> Self {
        PgValue::Bool(v)
    }
}

impl From<i16> for PgValue {
    fn from(v: i16) -> Self {
        PgValue::Int2(v)
    }
}

impl From<i32> for PgValue {
    fn from(v: i32) -> Self {
        PgValue::Int4(v)
    }
}

impl From<i64> for PgValue {
    fn from(v: i64) -> Self {
        PgValue::Int8(v)
    }
}

impl From<f32> for PgValue {
    fn from(v: f32) -> Self {
        PgValue::Float4(v)
    }
}

impl From<f64> for PgValue {
    fn from(v: f64) -> Self {
        PgValue::Float8(v)
    }
}

impl From<&str> for PgValue {
    fn from(v: &str) -> Self {
        PgValue::Text(v.to_string())
    }
}

impl From<String> for PgValue {
    fn from(v: String) -> Self {
        PgValue::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_text_form() {
        assert_eq!(PgValue::Bool(true).to_string(), "t");
        assert_eq!(PgValue::Int2(-32768).to_string(), "-32768");
        assert_eq!(PgValue::Float8(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(PgValue::Float4(f32::NAN).to_string(), "NaN");
        assert_eq!(PgValue::Text("héllo".into()).to_string(), "héllo");
    }

    #[test]
    fn test_widening_accessors() {
        assert_eq!(PgValue::Int2(7).as_i64(), Some(7));
        assert_eq!(PgValue::Oid(u32::MAX).as_i64(), Some(4294967295));
        assert_eq!(PgValue::Float4(0.5).as_f64(), Some(0.5));
        assert_eq!(PgValue::Bool(true).as_i64(), None);
        assert_eq!(PgValue::Text("x".into()).as_str(), Some("x"));
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&PgValue::Int4(42)).unwrap();
        assert_eq!(json, r#"{"type":"int4","value":42}"#);
    }
}
