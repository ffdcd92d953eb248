//! Built-in scalar transcoders.
//!
//! | oid  | type    | preferred |
//! |------|---------|-----------|
//! | 16   | bool    | binary    |
//! | 20   | int8    | binary    |
//! | 21   | int2    | binary    |
//! | 23   | int4    | binary    |
//! | 26   | oid     | binary    |
//! | 700  | float4  | binary    |
//! | 701  | float8  | binary    |
//! | 19   | name    | text      |
//! | 25   | text    | text      |
//! | 1042 | bpchar  | text      |
//! | 1043 | varchar | text      |

use super::transcoder::{DecodeFn, EncodeFn, Transcoder};
use super::{binary, text};
use crate::protocol::{Oid, WireFormat, oid};

struct Builtin {
    oid: Oid,
    name: &'static str,
    text: (DecodeFn, EncodeFn),
    binary: (DecodeFn, EncodeFn),
    preferred: WireFormat,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        oid: oid::BOOL,
        name: "bool",
        text: (text::decode_bool, text::encode_bool),
        binary: (binary::decode_bool, binary::encode_bool),
        preferred: WireFormat::Binary,
    },
    Builtin {
        oid: oid::INT8,
        name: "int8",
        text: (text::decode_int8, text::encode_int8),
        binary: (binary::decode_int8, binary::encode_int8),
        preferred: WireFormat::Binary,
    },
    Builtin {
        oid: oid::INT2,
        name: "int2",
        text: (text::decode_int2, text::encode_int2),
        binary: (binary::decode_int2, binary::encode_int2),
        preferred: WireFormat::Binary,
    },
    Builtin {
        oid: oid::INT4,
        name: "int4",
        text: (text::decode_int4, text::encode_int4),
        binary: (binary::decode_int4, binary::encode_int4),
        preferred: WireFormat::Binary,
    },
    Builtin {
        oid: oid::OID,
        name: "oid",
        text: (text::decode_oid, text::encode_oid),
        binary: (binary::decode_oid, binary::encode_oid),
        preferred: WireFormat::Binary,
    },
    Builtin {
        oid: oid::FLOAT4,
        name: "float4",
        text: (text::decode_float4, text::encode_float4),
        binary: (binary::decode_float4, binary::encode_float4),
        preferred: WireFormat::Binary,
    },
    Builtin {
        oid: oid::FLOAT8,
        name: "float8",
        text: (text::decode_float8, text::encode_float8),
        binary: (binary::decode_float8, binary::encode_float8),
        preferred: WireFormat::Binary,
    },
    Builtin {
        oid: oid::NAME,
        name: "name",
        text: (text::decode_text, text::encode_text),
        binary: (binary::decode_text, binary::encode_text),
        preferred: WireFormat::Text,
    },
    Builtin {
        oid: oid::TEXT,
        name: "text",
        text: (text::decode_text, text::encode_text),
        binary: (binary::decode_text, binary::encode_text),
        preferred: WireFormat::Text,
    },
    Builtin {
        oid: oid::BPCHAR,
        name: "bpchar",
        text: (text::decode_text, text::encode_text),
        binary: (binary::decode_text, binary::encode_text),
        preferred: WireFormat::Text,
    },
    Builtin {
        oid: oid::VARCHAR,
        name: "varchar",
        text: (text::decode_text, text::encode_text),
        binary: (binary::decode_text, binary::encode_text),
        preferred: WireFormat::Text,
    },
];

impl Builtin {
    fn transcoder(&self, format: WireFormat) -> Transcoder {
        Transcoder::new(self.name)
            .with_text_decoder(self.text.0)
            .with_binary_decoder(self.binary.0)
            .with_encoder(self.encoder(format), format)
            .with_base(self.oid)
    }

    fn encoder(&self, format: WireFormat) -> EncodeFn {
        match format {
            WireFormat::Text => self.text.1,
            WireFormat::Binary => self.binary.1,
        }
    }
}

fn find(oid: Oid) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.oid == oid)
}

/// The built-in encoder for `oid` writing `format`.
pub fn encoder(oid: Oid, format: WireFormat) -> Option<EncodeFn> {
    find(oid).map(|b| b.encoder(format))
}

/// Every built-in transcoder with its default preferred format.
pub fn all() -> impl Iterator<Item = (Oid, Transcoder)> {
    BUILTINS.iter().map(|b| (b.oid, b.transcoder(b.preferred)))
}

/// The built-in transcoder for `oid`, with its default preferred format.
pub fn transcoder(oid: Oid) -> Option<Transcoder> {
    find(oid).map(|b| b.transcoder(b.preferred))
}

/// The built-in transcoder for `oid`, encoding in `format` instead.
pub fn transcoder_with_format(oid: Oid, format: WireFormat) -> Option<Transcoder> {
    find(oid).map(|b| b.transcoder(format))
}
