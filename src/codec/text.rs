//! Text-format codecs.
//!
//! Text grammars for the built-in scalars are the host's own decimal and
//! float literal syntax, so decoding defers to `str::parse` at each width.
//! The only hand-written grammar is `bool`: exactly `t` or `f`.
//!
//! Encoders write the form the server's input functions accept:
//! - integers via `itoa`
//! - floats via `ryu` (shortest round-trip), with `NaN` / `Infinity` / `-Infinity`

use std::num::IntErrorKind;
use std::str::FromStr;

use bytes::BytesMut;

use super::convert;
use super::error::{DecodeError, EncodeError};
use super::value::PgValue;

// ==================== Decoders ====================

pub fn decode_bool(raw: &[u8]) -> Result<PgValue, DecodeError> {
    match raw {
        b"t" => Ok(PgValue::Bool(true)),
        b"f" => Ok(PgValue::Bool(false)),
        _ => Err(DecodeError::malformed("bool", raw)),
    }
}

pub fn decode_int2(raw: &[u8]) -> Result<PgValue, DecodeError> {
    parse_int::<i16>("int2", raw).map(PgValue::Int2)
}

pub fn decode_int4(raw: &[u8]) -> Result<PgValue, DecodeError> {
    parse_int::<i32>("int4", raw).map(PgValue::Int4)
}

pub fn decode_int8(raw: &[u8]) -> Result<PgValue, DecodeError> {
    parse_int::<i64>("int8", raw).map(PgValue::Int8)
}

pub fn decode_oid(raw: &[u8]) -> Result<PgValue, DecodeError> {
    parse_int::<u32>("oid", raw).map(PgValue::Oid)
}

pub fn decode_float4(raw: &[u8]) -> Result<PgValue, DecodeError> {
    let s = utf8("float4", raw)?;
    let n: f32 = s.parse().map_err(|_| DecodeError::malformed("float4", raw))?;
    if n.is_nan() && is_signed(s) {
        return Err(DecodeError::malformed("float4", raw));
    }
    if n.is_infinite() && !is_infinity_literal(s) {
        return Err(DecodeError::overflow("float4", raw));
    }
    Ok(PgValue::Float4(n))
}

pub fn decode_float8(raw: &[u8]) -> Result<PgValue, DecodeError> {
    let s = utf8("float8", raw)?;
    let n: f64 = s.parse().map_err(|_| DecodeError::malformed("float8", raw))?;
    if n.is_nan() && is_signed(s) {
        return Err(DecodeError::malformed("float8", raw));
    }
    if n.is_infinite() && !is_infinity_literal(s) {
        return Err(DecodeError::overflow("float8", raw));
    }
    Ok(PgValue::Float8(n))
}

/// Shared by text, varchar, bpchar and name.
pub fn decode_text(raw: &[u8]) -> Result<PgValue, DecodeError> {
    utf8("text", raw).map(|s| PgValue::Text(s.to_string()))
}

fn utf8<'a>(expected: &'static str, raw: &'a [u8]) -> Result<&'a str, DecodeError> {
    std::str::from_utf8(raw).map_err(|_| DecodeError::malformed(expected, raw))
}

/// Base-10 parse; overflow is reported apart from bad syntax.
fn parse_int<T>(expected: &'static str, raw: &[u8]) -> Result<T, DecodeError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    let s = utf8(expected, raw)?;
    if !is_decimal_literal(s) {
        return Err(DecodeError::malformed(expected, raw));
    }
    s.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            DecodeError::overflow(expected, raw)
        }
        _ => DecodeError::malformed(expected, raw),
    })
}

/// Optional sign followed by one or more ASCII digits, nothing else.
fn is_decimal_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// NaN carries no sign in the server's grammar; `-nan` is rejected.
fn is_signed(s: &str) -> bool {
    s.starts_with(['+', '-'])
}

/// Rust's float parser maps out-of-range literals to infinity; only an
/// explicit infinity spelling may produce one.
fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

// ==================== Encoders ====================

pub fn encode_bool(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    match value {
        PgValue::Bool(true) => buf.extend_from_slice(b"t"),
        PgValue::Bool(false) => buf.extend_from_slice(b"f"),
        other => return Err(convert::mismatch("bool", other)),
    }
    Ok(())
}

pub fn encode_int2(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    write_int(buf, convert::to_i16(value)?);
    Ok(())
}

pub fn encode_int4(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    write_int(buf, convert::to_i32(value)?);
    Ok(())
}

pub fn encode_int8(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    write_int(buf, convert::to_i64(value)?);
    Ok(())
}

pub fn encode_oid(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    write_int(buf, convert::to_oid(value)?);
    Ok(())
}

pub fn encode_float4(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    let n = convert::to_f32(value)?;
    buf.extend_from_slice(float4_text(&mut ryu::Buffer::new(), n).as_bytes());
    Ok(())
}

pub fn encode_float8(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    let n = convert::to_f64(value)?;
    buf.extend_from_slice(float8_text(&mut ryu::Buffer::new(), n).as_bytes());
    Ok(())
}

pub fn encode_text(value: &PgValue, buf: &mut BytesMut) -> Result<(), EncodeError> {
    buf.extend_from_slice(convert::to_text(value)?.as_bytes());
    Ok(())
}

#[inline(always)]
fn write_int<I: itoa::Integer>(buf: &mut BytesMut, n: I) {
    buf.extend_from_slice(itoa::Buffer::new().format(n).as_bytes());
}

/// PostgreSQL text form of an f32.
pub(crate) fn float4_text(buf: &mut ryu::Buffer, n: f32) -> &str {
    if n.is_nan() {
        "NaN"
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }
    } else {
        buf.format_finite(n)
    }
}

/// PostgreSQL text form of an f64.
pub(crate) fn float8_text(buf: &mut ryu::Buffer, n: f64) -> &str {
    if n.is_nan() {
        "NaN"
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }
    } else {
        buf.format_finite(n)
    }
}
