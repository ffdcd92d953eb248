//! Type registry: oid → transcoder.
//!
//! Built explicitly, populated during setup, then shared read-only
//! (`Arc<TypeRegistry>` or `&TypeRegistry`). Lookups take `&self`,
//! registration takes `&mut self`, so no writer can exist once the
//! registry is shared. Independent registries never share state.

use std::collections::HashMap;

use bytes::{BufMut, BytesMut};

use super::builtins;
use super::error::{EncodeError, RegistryError, TranscodeError};
use super::transcoder::{EncodeFn, Transcoder};
use super::value::PgValue;
use crate::protocol::{Oid, WireFormat};

/// Mapping from server type oid to its transcoder.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<Oid, Transcoder>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in scalar type.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (oid, transcoder) in builtins::all() {
            registry.entries.insert(oid, transcoder);
        }
        tracing::debug!(types = registry.len(), "Built-in type registry ready");
        registry
    }

    /// Insert or replace the transcoder for `oid`.
    ///
    /// Returns the replaced entry, if any. A transcoder without any decoder
    /// is rejected and the registry is left untouched.
    pub fn register(
        &mut self,
        oid: Oid,
        transcoder: Transcoder,
    ) -> Result<Option<Transcoder>, RegistryError> {
        if !transcoder.has_decoder() {
            return Err(RegistryError::NoDecoder { oid });
        }
        let previous = self.entries.insert(oid, transcoder);
        if let Some(prev) = &previous {
            tracing::debug!(oid, replaced = prev.name(), "Replacing transcoder");
        }
        Ok(previous)
    }

    /// Transcoder for `oid`, or `None` when the type is unknown.
    pub fn lookup(&self, oid: Oid) -> Option<&Transcoder> {
        self.entries.get(&oid)
    }

    pub fn contains(&self, oid: Oid) -> bool {
        self.entries.contains_key(&oid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by oid.
    pub fn iter(&self) -> impl Iterator<Item = (Oid, &Transcoder)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(oid, t)| (*oid, t)).collect();
        entries.sort_by_key(|(oid, _)| *oid);
        entries.into_iter()
    }

    /// Decode one field.
    ///
    /// `LookupMiss` (unknown type) is kept apart from `Decode` (known type,
    /// bad bytes) so the caller can pick its own fallback.
    pub fn decode(
        &self,
        oid: Oid,
        format: WireFormat,
        raw: &[u8],
    ) -> Result<PgValue, TranscodeError> {
        let transcoder = self.lookup(oid).ok_or(TranscodeError::LookupMiss { oid })?;
        let decode = transcoder
            .decoder(format)
            .ok_or(TranscodeError::UnsupportedFormat { oid, format })?;
        Ok(decode(raw)?)
    }

    /// Append a value's payload in the type's preferred format.
    ///
    /// Returns the format written, for the Bind message's format codes.
    /// On error nothing is appended.
    pub fn encode(
        &self,
        oid: Oid,
        value: &PgValue,
        buf: &mut BytesMut,
    ) -> Result<WireFormat, TranscodeError> {
        let transcoder = self.lookup(oid).ok_or(TranscodeError::LookupMiss { oid })?;
        let encode = transcoder
            .encoder()
            .ok_or(TranscodeError::NotEncodable { oid })?;
        write_payload(encode, value, buf)?;
        Ok(transcoder.preferred_format())
    }

    /// Append a value's payload in `format`, which may differ from the
    /// type's preferred format when the transcoder has a built-in base.
    /// On error nothing is appended.
    pub fn encode_as(
        &self,
        oid: Oid,
        value: &PgValue,
        format: WireFormat,
        buf: &mut BytesMut,
    ) -> Result<(), TranscodeError> {
        let transcoder = self.lookup(oid).ok_or(TranscodeError::LookupMiss { oid })?;
        let encode = transcoder.encoder_for(format).ok_or(if transcoder.can_encode() {
            TranscodeError::UnsupportedEncodeFormat { oid, format }
        } else {
            TranscodeError::NotEncodable { oid }
        })?;
        write_payload(encode, value, buf)
    }

    /// Append one Bind parameter: i32 length (big-endian) then payload,
    /// or length -1 for NULL.
    ///
    /// NULL still resolves the type so the returned format code is right.
    pub fn encode_param(
        &self,
        oid: Oid,
        value: Option<&PgValue>,
        buf: &mut BytesMut,
    ) -> Result<WireFormat, TranscodeError> {
        let Some(value) = value else {
            let transcoder = self.lookup(oid).ok_or(TranscodeError::LookupMiss { oid })?;
            buf.put_i32(-1);
            return Ok(transcoder.preferred_format());
        };

        let len_pos = buf.len();
        buf.put_i32(0); // placeholder
        match self.encode(oid, value, buf) {
            Ok(format) => match frame_len(buf.len() - len_pos - 4) {
                Ok(len) => {
                    buf[len_pos..len_pos + 4].copy_from_slice(&len.to_be_bytes());
                    Ok(format)
                }
                Err(e) => {
                    buf.truncate(len_pos);
                    Err(e.into())
                }
            },
            Err(e) => {
                buf.truncate(len_pos);
                Err(e)
            }
        }
    }
}

fn write_payload(
    encode: EncodeFn,
    value: &PgValue,
    buf: &mut BytesMut,
) -> Result<(), TranscodeError> {
    let mark = buf.len();
    if let Err(e) = encode(value, buf) {
        buf.truncate(mark);
        return Err(e.into());
    }
    Ok(())
}

/// Bind lengths are i32; -1 is reserved for NULL.
fn frame_len(len: usize) -> Result<i32, EncodeError> {
    i32::try_from(len).map_err(|_| EncodeError::TooLarge { len })
}
