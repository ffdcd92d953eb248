//! Value coercions shared by the text and binary encoders.
//!
//! Widening is always allowed; narrowing is range-checked.

use super::error::EncodeError;
use super::value::PgValue;

pub(crate) fn mismatch(expected: &'static str, found: &PgValue) -> EncodeError {
    EncodeError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

fn integer(expected: &'static str, value: &PgValue) -> Result<i64, EncodeError> {
    value.as_i64().ok_or_else(|| mismatch(expected, value))
}

fn narrow<T: TryFrom<i64>>(expected: &'static str, n: i64) -> Result<T, EncodeError> {
    T::try_from(n).map_err(|_| EncodeError::RangeOverflow {
        expected,
        value: n.to_string(),
    })
}

pub(crate) fn to_i16(value: &PgValue) -> Result<i16, EncodeError> {
    match value {
        PgValue::Int2(n) => Ok(*n),
        other => narrow("int2", integer("int2", other)?),
    }
}

pub(crate) fn to_i32(value: &PgValue) -> Result<i32, EncodeError> {
    match value {
        PgValue::Int4(n) => Ok(*n),
        other => narrow("int4", integer("int4", other)?),
    }
}

pub(crate) fn to_i64(value: &PgValue) -> Result<i64, EncodeError> {
    integer("int8", value)
}

pub(crate) fn to_oid(value: &PgValue) -> Result<u32, EncodeError> {
    match value {
        PgValue::Oid(n) => Ok(*n),
        other => narrow("oid", integer("oid", other)?),
    }
}

pub(crate) fn to_f32(value: &PgValue) -> Result<f32, EncodeError> {
    match value {
        PgValue::Float4(n) => Ok(*n),
        other => Err(mismatch("float4", other)),
    }
}

pub(crate) fn to_f64(value: &PgValue) -> Result<f64, EncodeError> {
    value.as_f64().ok_or_else(|| mismatch("float8", value))
}

/// Text payloads cannot carry NUL on the wire.
pub(crate) fn to_text(value: &PgValue) -> Result<&str, EncodeError> {
    match value {
        PgValue::Text(s) if s.as_bytes().contains(&0) => Err(EncodeError::NullByte),
        PgValue::Text(s) => Ok(s),
        other => Err(mismatch("text", other)),
    }
}
