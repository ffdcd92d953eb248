//! Transcoder: the decode/encode bundle attached to one type oid.

use std::borrow::Cow;
use std::fmt;

use bytes::BytesMut;

use super::builtins;
use super::error::{DecodeError, EncodeError};
use super::value::PgValue;
use crate::protocol::{Oid, WireFormat};

/// Decodes one field's raw bytes.
pub type DecodeFn = fn(&[u8]) -> Result<PgValue, DecodeError>;

/// Appends a value's payload (no length prefix) in the transcoder's preferred format.
pub type EncodeFn = fn(&PgValue, &mut BytesMut) -> Result<(), EncodeError>;

/// Capabilities for one server type.
///
/// # Example
/// ```
/// use pg_transcode::codec::{Transcoder, text};
/// use pg_transcode::protocol::WireFormat;
///
/// let t = Transcoder::new("my_domain")
///     .with_text_decoder(text::decode_int4)
///     .with_encoder(text::encode_int4, WireFormat::Text);
/// assert!(t.has_decoder());
/// ```
#[derive(Clone)]
pub struct Transcoder {
    name: Cow<'static, str>,
    decode_text: Option<DecodeFn>,
    decode_binary: Option<DecodeFn>,
    encode: Option<EncodeFn>,
    preferred_format: WireFormat,
    base: Option<Oid>,
}

impl Transcoder {
    /// Create an empty transcoder. It must gain at least one decoder
    /// before a registry will accept it.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            decode_text: None,
            decode_binary: None,
            encode: None,
            preferred_format: WireFormat::Text,
            base: None,
        }
    }

    /// Builder: text-format decoder.
    pub fn with_text_decoder(mut self, f: DecodeFn) -> Self {
        self.decode_text = Some(f);
        self
    }

    /// Builder: binary-format decoder.
    pub fn with_binary_decoder(mut self, f: DecodeFn) -> Self {
        self.decode_binary = Some(f);
        self
    }

    /// Builder: encoder plus the format it writes, which is also the
    /// format requested when binding parameters of this type.
    pub fn with_encoder(mut self, f: EncodeFn, format: WireFormat) -> Self {
        self.encode = Some(f);
        self.preferred_format = format;
        self
    }

    /// Builder: built-in type whose codecs this transcoder reuses.
    /// Lets it encode in either format, not just the preferred one.
    pub fn with_base(mut self, oid: Oid) -> Self {
        self.base = Some(oid);
        self
    }

    /// Builder: rename, keeping every capability.
    pub fn renamed(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preferred_format(&self) -> WireFormat {
        self.preferred_format
    }

    pub fn has_decoder(&self) -> bool {
        self.decode_text.is_some() || self.decode_binary.is_some()
    }

    pub fn supports(&self, format: WireFormat) -> bool {
        self.decoder(format).is_some()
    }

    pub fn can_encode(&self) -> bool {
        self.encode.is_some()
    }

    /// Decoder for a wire format, if this type has one.
    pub fn decoder(&self, format: WireFormat) -> Option<DecodeFn> {
        match format {
            WireFormat::Text => self.decode_text,
            WireFormat::Binary => self.decode_binary,
        }
    }

    pub fn encoder(&self) -> Option<EncodeFn> {
        self.encode
    }

    pub fn base(&self) -> Option<Oid> {
        self.base
    }

    /// Encoder writing `format`: the own encoder when that is the preferred
    /// format, otherwise the base built-in's encoder for `format`.
    pub fn encoder_for(&self, format: WireFormat) -> Option<EncodeFn> {
        if format == self.preferred_format && self.encode.is_some() {
            return self.encode;
        }
        self.base.and_then(|base| builtins::encoder(base, format))
    }
}

impl fmt::Debug for Transcoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transcoder")
            .field("name", &self.name)
            .field("text", &self.decode_text.is_some())
            .field("binary", &self.decode_binary.is_some())
            .field("encode", &self.encode.is_some())
            .field("preferred_format", &self.preferred_format)
            .field("base", &self.base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{binary, text};

    #[test]
    fn test_defaults() {
        let t = Transcoder::new("empty");
        assert!(!t.has_decoder());
        assert!(!t.can_encode());
        assert_eq!(t.preferred_format(), WireFormat::Text);
    }

    #[test]
    fn test_decoder_selection() {
        let t = Transcoder::new("int4")
            .with_text_decoder(text::decode_int4)
            .with_binary_decoder(binary::decode_int4);

        let text_fn = t.decoder(WireFormat::Text).unwrap();
        let bin_fn = t.decoder(WireFormat::Binary).unwrap();
        assert_eq!(text_fn(b"42"), Ok(PgValue::Int4(42)));
        assert_eq!(bin_fn(&42i32.to_be_bytes()), Ok(PgValue::Int4(42)));
    }

    #[test]
    fn test_text_only() {
        let t = Transcoder::new("bool").with_text_decoder(text::decode_bool);
        assert!(t.supports(WireFormat::Text));
        assert!(!t.supports(WireFormat::Binary));
    }

    #[test]
    fn test_encoder_sets_format() {
        let t = Transcoder::new("int8")
            .with_text_decoder(text::decode_int8)
            .with_encoder(binary::encode_int8, WireFormat::Binary);
        assert_eq!(t.preferred_format(), WireFormat::Binary);
        assert_eq!(t.renamed("bigint").name(), "bigint");
    }

    #[test]
    fn test_encoder_for_other_format_needs_base() {
        let plain = Transcoder::new("int4")
            .with_text_decoder(text::decode_int4)
            .with_encoder(binary::encode_int4, WireFormat::Binary);
        assert!(plain.encoder_for(WireFormat::Binary).is_some());
        assert!(plain.encoder_for(WireFormat::Text).is_none());

        let based = plain.with_base(23);
        let encode = based.encoder_for(WireFormat::Text).unwrap();
        let mut buf = BytesMut::new();
        encode(&PgValue::Int4(17), &mut buf).unwrap();
        assert_eq!(&buf[..], b"17");
    }
}
