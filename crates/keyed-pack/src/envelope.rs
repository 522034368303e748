//! The `[payload, key_table]` wire envelope.
//!
//! Compact responses ship as a MessagePack two-element array: the payload
//! tree with interned integer keys, and the flat table of key names built
//! while interning. Decoding splits the envelope and remaps; encoding is the
//! mirror image.

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::key_table::{KeyTable, KeyTableBuilder};
use crate::keyed_value::KeyedValue;
use crate::msgpack::{MsgPackDecoder, MsgPackEncoder, MsgPackError};
use crate::remap::remap;

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error(transparent)]
    MsgPack(#[from] MsgPackError),
    #[error("envelope is not a two-element array")]
    BadEnvelope,
    #[error("trailing bytes after envelope")]
    TrailingBytes,
}

/// Decode a compact envelope into a plain JSON tree.
///
/// The envelope framing is strict: the blob must hold exactly one
/// two-element array. The key table inside it is not; a malformed table
/// degrades to keeping integer keys, per the optional nature of renaming.
pub fn decode_json_from_keyed_bytes(blob: &[u8]) -> Result<JsonValue, EnvelopeError> {
    KeyedJsonCodec::new().decode(blob)
}

/// Encode a plain JSON tree as a compact envelope.
pub fn encode_json_to_keyed_bytes(value: &JsonValue) -> Vec<u8> {
    KeyedJsonCodec::new().encode(value)
}

/// Stateful envelope codec, the seam a transport layer holds on to.
pub struct KeyedJsonCodec {
    pub encoder: MsgPackEncoder,
    pub decoder: MsgPackDecoder,
}

impl Default for KeyedJsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyedJsonCodec {
    pub fn new() -> Self {
        Self {
            encoder: MsgPackEncoder::new(),
            decoder: MsgPackDecoder::new(),
        }
    }

    pub fn id(&self) -> &'static str {
        "keyed-msgpack"
    }

    /// Interns every object key into one flat table and packs
    /// `[payload, table]`. Nested values are lowered before their own key,
    /// so table order matches the wire producers this format comes from.
    pub fn encode(&mut self, value: &JsonValue) -> Vec<u8> {
        let mut builder = KeyTableBuilder::new();
        let payload = lower(value, &mut builder);
        let envelope = KeyedValue::Array(vec![payload, builder.into_value()]);
        self.encoder.encode(&envelope)
    }

    pub fn decode(&mut self, blob: &[u8]) -> Result<JsonValue, EnvelopeError> {
        let (value, consumed) = self.decoder.decode_with_consumed(blob)?;
        if consumed != blob.len() {
            return Err(EnvelopeError::TrailingBytes);
        }
        split_and_remap(value)
    }
}

fn split_and_remap(envelope: KeyedValue) -> Result<JsonValue, EnvelopeError> {
    let KeyedValue::Array(parts) = envelope else {
        return Err(EnvelopeError::BadEnvelope);
    };
    let [payload, table] =
        <[KeyedValue; 2]>::try_from(parts).map_err(|_| EnvelopeError::BadEnvelope)?;
    let table = KeyTable::from_value(&table);
    Ok(remap(&payload, &table))
}

fn lower(value: &JsonValue, builder: &mut KeyTableBuilder) -> KeyedValue {
    match value {
        JsonValue::Array(items) => {
            KeyedValue::Array(items.iter().map(|item| lower(item, builder)).collect())
        }
        JsonValue::Object(fields) => {
            let mut entries = Vec::with_capacity(fields.len());
            for (name, val) in fields {
                let val = lower(val, builder);
                entries.push((builder.intern(name), val));
            }
            KeyedValue::Map(entries)
        }
        scalar => KeyedValue::from(scalar.clone()),
    }
}
