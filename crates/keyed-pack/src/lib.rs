//! Key-compacted MessagePack payloads: decoding, remapping, and encoding.
//!
//! The wire format avoids repeating string keys: every object key in a
//! response is interned into a flat side table, maps are keyed by the table
//! index, and the blob ships as a two-element array `[payload, key_table]`.
//! This crate decodes such blobs, reconstructs a plain JSON tree with the
//! human-readable names put back ([`remap`]), and produces the format from
//! plain JSON ([`encode_json_to_keyed_bytes`]).

mod envelope;
mod key_table;
mod keyed_value;
mod remap;

pub mod msgpack;

pub use envelope::{
    decode_json_from_keyed_bytes, encode_json_to_keyed_bytes, EnvelopeError, KeyedJsonCodec,
};
pub use key_table::{KeyTable, KeyTableBuilder};
pub use keyed_value::{KeyedExtension, KeyedValue, MapKey};
pub use remap::{remap, BINARY_URI_PREFIX};
