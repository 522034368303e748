//! MessagePack encoding/decoding over [`KeyedValue`](crate::KeyedValue).

mod decoder;
mod encoder;
mod error;

pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;

use crate::keyed_value::KeyedValue;

/// Decode MessagePack bytes into a [`KeyedValue`].
pub fn decode(blob: &[u8]) -> Result<KeyedValue, MsgPackError> {
    let mut decoder = MsgPackDecoder::new();
    decoder.decode(blob)
}

/// Encode a [`KeyedValue`] into MessagePack bytes.
pub fn encode(value: &KeyedValue) -> Vec<u8> {
    let mut encoder = MsgPackEncoder::new();
    encoder.encode(value)
}
