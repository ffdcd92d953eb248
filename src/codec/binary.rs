//! Binary-format codecs.
//!
//! Fixed-width network byte order for bool, integers, floats and oid; raw
//! UTF-8 for the string types. Packing is delegated to `postgres_protocol::types`.
//! Any width other than the type's exact size is malformed.

use bytes::BytesMut;
use postgres_protocol::types;

use super::convert;
use super::error::{DecodeError, EncodeError};
use super::value::PgValue;

// ==================== Decoders ====================

pub fn decode_bool(raw: &[u8]) -> Result<PgValue, DecodeError> {
    types::bool_from_sql(raw)
        .map(PgValue::Bool)
        .map_err(|_| DecodeError::malformed_binary("bool", raw))
}

pub fn decode_int2(raw: &[u8]) -> Result<PgValue, DecodeError> {
    types::int2_from_sql(raw)
        .map(PgValue::Int2)
        .map_err(|_| DecodeError::malformed_binary("int2", raw))
}

pub fn decode_int4(raw: &[u8]) -> Result<PgValue, DecodeError> {
    types::int4_from_sql(raw)
        .map(PgValue::Int4)
        .map_err(|_| DecodeError::malformed_binary("int4", raw))
}

pub fn decode_int8(raw: &[u8]) -> Result<PgValue, DecodeError> {
    types::int8_from_sql(raw)
        .map(PgValue::Int8)
        .map_err(|_| DecodeError::malformed_binary("int8", raw))
}

pub fn decode_oid(raw: &[u8]) -> Result<PgValue, DecodeError> {
    types::oid_from_sql(raw)
        .map(PgValue::Oid)
        .map_err(|_| DecodeError::malformed_binary("oid", raw))
}

pub fn decode_float4(raw: &[u8]) -> Result<PgValue, DecodeError> {
    types::float4_from_sql(raw)
        .map(PgValue::Float4)
        .map_err(|_| DecodeError::malformed_binary("float4", raw))
}

pub fn decode_float8(raw: &[u8]) -> Result<PgValue, DecodeError> {
    types::float8_from_sql(raw)
        .map(PgValue::Float8)
        .map_err(|_| DecodeError::malformed_binary("float8", raw))
}

pub fn decode_text(raw: &[u8]) -> Result<PgValue, DecodeError> {
    types::text_from_sql(raw)
        .map(|s| PgValue::Text(s.to_string()))
        .map_err(|_| DecodeError::malformed_binary("text", raw))
}

// ==================== Encoders ====================

pub fn encode_bool(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    let v = value.as_bool().ok_or_else(|| convert::mismatch("bool", value))?;
    types::bool_to_sql(v, buf);
    Ok(())
}

pub fn encode_int2(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    types::int2_to_sql(convert::to_i16(value)?, buf);
    Ok(())
}

pub fn encode_int4(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    types::int4_to_sql(convert::to_i32(value)?, buf);
    Ok(())
}

pub fn encode_int8(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    types::int8_to_sql(convert::to_i64(value)?, buf);
    Ok(())
}

pub fn encode_oid(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    types::oid_to_sql(convert::to_oid(value)?, buf);
    Ok(())
}

pub fn encode_float4(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    types::float4_to_sql(convert::to_f32(value)?, buf);
    Ok(())
}

pub fn encode_float8(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    types::float8_to_sql(convert::to_f64(value)?, buf);
    Ok(())
}

pub fn encode_text(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    types::text_to_sql(convert::to_text(value)?, buf);
    Ok(())
}
