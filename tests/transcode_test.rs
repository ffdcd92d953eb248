//! End-to-end transcoding through a registry.
//!
//! Covers the wire-compatibility guarantees for the built-in scalars:
//! exact boundary values, overflow vs. malformed, lookup misses, replacement
//! semantics, and encode/decode round-trips in both formats.

use std::sync::Arc;
use std::thread;

use bytes::BytesMut;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use pg_transcode::codec::{Transcoder, text};
use pg_transcode::{DecodeErrorKind, PgValue, TranscodeError, TypeRegistry, WireFormat};

fn decode_text(registry: &TypeRegistry, oid: u32, s: &str) -> Result<PgValue, TranscodeError> {
    registry.decode(oid, WireFormat::Text, s.as_bytes())
}

fn decode_kind(registry: &TypeRegistry, oid: u32, s: &str) -> DecodeErrorKind {
    match decode_text(registry, oid, s) {
        Err(TranscodeError::Decode(e)) => e.kind,
        other => panic!("expected decode failure for {:?}, got {:?}", s, other),
    }
}

#[test]
fn test_integer_boundaries_exact() {
    let registry = TypeRegistry::with_builtins();
    let cases = [
        (21, "-32768", PgValue::Int2(i16::MIN)),
        (21, "32767", PgValue::Int2(i16::MAX)),
        (21, "0", PgValue::Int2(0)),
        (21, "-1", PgValue::Int2(-1)),
        (23, "-2147483648", PgValue::Int4(i32::MIN)),
        (23, "2147483647", PgValue::Int4(i32::MAX)),
        (23, "0", PgValue::Int4(0)),
        (23, "-1", PgValue::Int4(-1)),
        (20, "-9223372036854775808", PgValue::Int8(i64::MIN)),
        (20, "9223372036854775807", PgValue::Int8(i64::MAX)),
        (20, "0", PgValue::Int8(0)),
        (20, "-1", PgValue::Int8(-1)),
    ];
    for (oid, input, expected) in cases {
        assert_eq!(decode_text(&registry, oid, input), Ok(expected));
    }
}

#[test]
fn test_bool_grammar() {
    let registry = TypeRegistry::with_builtins();
    assert_eq!(decode_text(&registry, 16, "t"), Ok(PgValue::Bool(true)));
    assert_eq!(decode_text(&registry, 16, "f"), Ok(PgValue::Bool(false)));
    for bad in ["true", "false", "1", "0", "", "yes"] {
        assert_eq!(decode_kind(&registry, 16, bad), DecodeErrorKind::Malformed);
    }
}

#[test]
fn test_overflow_not_truncated() {
    let registry = TypeRegistry::with_builtins();
    assert_eq!(decode_kind(&registry, 21, "40000"), DecodeErrorKind::RangeOverflow);
    assert_eq!(decode_kind(&registry, 23, "-2147483649"), DecodeErrorKind::RangeOverflow);
    assert_eq!(
        decode_kind(&registry, 20, "99999999999999999999"),
        DecodeErrorKind::RangeOverflow
    );
    assert_eq!(decode_kind(&registry, 700, "3.5e38"), DecodeErrorKind::RangeOverflow);
    assert_eq!(decode_kind(&registry, 23, "xyz"), DecodeErrorKind::Malformed);
}

#[test]
fn test_decode_error_descriptor() {
    let registry = TypeRegistry::with_builtins();
    let err = decode_text(&registry, 21, "40000").unwrap_err();
    assert_eq!(err.to_string(), r#"int2 value out of range: "40000""#);
}

#[test]
fn test_scientific_floats_round_trip() {
    let registry = TypeRegistry::with_builtins();
    for oid in [700u32, 701] {
        let value = decode_text(&registry, oid, "1.5e10").unwrap();

        let mut buf = BytesMut::new();
        let format = registry.encode(oid, &value, &mut buf).unwrap();
        let back = registry.decode(oid, format, &buf).unwrap();
        assert_eq!(back, value);
        assert_eq!(back.as_f64(), Some(1.5e10));
    }
}

#[test]
fn test_unregistered_type_is_lookup_miss() {
    let registry = TypeRegistry::with_builtins();
    for format in [WireFormat::Text, WireFormat::Binary] {
        let err = registry.decode(9999, format, b"0").unwrap_err();
        assert_eq!(err, TranscodeError::LookupMiss { oid: 9999 });
    }
    assert!(registry.lookup(9999).is_none());
}

#[test]
fn test_second_registration_wins() {
    fn always_one(_: &[u8]) -> Result<PgValue, pg_transcode::DecodeError> {
        Ok(PgValue::Int4(1))
    }

    let mut registry = TypeRegistry::with_builtins();
    let before = registry.len();
    registry
        .register(23, Transcoder::new("int4").with_text_decoder(always_one))
        .unwrap();

    assert_eq!(registry.len(), before);
    assert_eq!(decode_text(&registry, 23, "42"), Ok(PgValue::Int4(1)));
    // replaced entry has no binary decoder any more
    assert!(matches!(
        registry.decode(23, WireFormat::Binary, &42i32.to_be_bytes()),
        Err(TranscodeError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_independent_registries() {
    let mut custom = TypeRegistry::with_builtins();
    custom
        .register(40000, Transcoder::new("tag").with_text_decoder(text::decode_text))
        .unwrap();
    let plain = TypeRegistry::with_builtins();

    assert!(custom.contains(40000));
    assert!(!plain.contains(40000));
}

#[test]
fn test_shared_registry_concurrent_reads() {
    let registry = Arc::new(TypeRegistry::with_builtins());
    let handles: Vec<_> = (0..4i32)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for n in 0..1000 {
                    let v = n * 4 + i;
                    let got = registry
                        .decode(23, WireFormat::Text, v.to_string().as_bytes())
                        .unwrap();
                    assert_eq!(got, PgValue::Int4(v));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn test_binary_round_trip_all_builtins() {
    let registry = TypeRegistry::with_builtins();
    let cases = [
        (16, PgValue::Bool(true)),
        (20, PgValue::Int8(i64::MIN)),
        (21, PgValue::Int2(i16::MAX)),
        (23, PgValue::Int4(-123456)),
        (26, PgValue::Oid(4_000_000_000)),
        (700, PgValue::Float4(-0.5)),
        (701, PgValue::Float8(std::f64::consts::PI)),
        (25, PgValue::Text("naïve".into())),
        (1043, PgValue::Text(String::new())),
    ];
    for (oid, value) in cases {
        let mut buf = BytesMut::new();
        let format = registry.encode(oid, &value, &mut buf).unwrap();
        assert_eq!(registry.decode(oid, format, &buf), Ok(value));
    }
}

#[test]
fn test_text_encoders_match_decoders() {
    let cases: [(u32, PgValue); 5] = [
        (16, PgValue::Bool(false)),
        (21, PgValue::Int2(i16::MIN)),
        (20, PgValue::Int8(i64::MAX)),
        (700, PgValue::Float4(f32::NEG_INFINITY)),
        (701, PgValue::Float8(1e-300)),
    ];
    for (oid, value) in cases {
        let t = pg_transcode::codec::builtins::transcoder_with_format(oid, WireFormat::Text).unwrap();
        let mut buf = BytesMut::new();
        (t.encoder().unwrap())(&value, &mut buf).unwrap();
        assert_eq!(value.to_string().as_bytes(), &buf[..]);
        assert_eq!(registry_text(oid, &buf), value);
    }
}

fn registry_text(oid: u32, raw: &[u8]) -> PgValue {
    TypeRegistry::with_builtins()
        .decode(oid, WireFormat::Text, raw)
        .unwrap()
}

proptest! {
    #[test]
    fn prop_int2_text_exact(n: i16) {
        let registry = TypeRegistry::with_builtins();
        prop_assert_eq!(decode_text(&registry, 21, &n.to_string()), Ok(PgValue::Int2(n)));
    }

    #[test]
    fn prop_int8_text_exact(n: i64) {
        let registry = TypeRegistry::with_builtins();
        prop_assert_eq!(decode_text(&registry, 20, &n.to_string()), Ok(PgValue::Int8(n)));
    }

    #[test]
    fn prop_int4_outside_range_overflows(n in prop_oneof![
        (i32::MAX as i64 + 1)..=i64::MAX,
        i64::MIN..=(i32::MIN as i64 - 1),
    ]) {
        let registry = TypeRegistry::with_builtins();
        prop_assert_eq!(decode_kind(&registry, 23, &n.to_string()), DecodeErrorKind::RangeOverflow);
    }

    #[test]
    fn prop_float8_text_round_trip(n in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        let registry = TypeRegistry::with_builtins();
        let text = PgValue::Float8(n).to_string();
        prop_assert_eq!(decode_text(&registry, 701, &text), Ok(PgValue::Float8(n)));
    }
}
