//! MessagePack decoder producing [`KeyedValue`] trees.

use crate::keyed_value::{KeyedExtension, KeyedValue, MapKey};

use super::error::MsgPackError;

/// MessagePack decoder.
///
/// Decodes every core family of the format. Map keys must be unsigned
/// integers or strings, the only kinds the compact key-interned wire format
/// produces; anything else is [`MsgPackError::InvalidKey`].
pub struct MsgPackDecoder;

impl Default for MsgPackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes one value from the front of `blob`, ignoring trailing bytes.
    pub fn decode(&mut self, blob: &[u8]) -> Result<KeyedValue, MsgPackError> {
        self.decode_with_consumed(blob).map(|(value, _)| value)
    }

    /// Decodes one value and reports how many bytes it occupied.
    pub fn decode_with_consumed(
        &mut self,
        blob: &[u8],
    ) -> Result<(KeyedValue, usize), MsgPackError> {
        let mut cursor = Cursor { data: blob, x: 0 };
        let value = cursor.read_value()?;
        Ok((value, cursor.x))
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Cursor<'a> {
    fn need(&self, n: usize) -> Result<(), MsgPackError> {
        if self.data.len() - self.x < n {
            return Err(MsgPackError::UnexpectedEof);
        }
        Ok(())
    }

    fn u8(&mut self) -> Result<u8, MsgPackError> {
        self.need(1)?;
        let val = self.data[self.x];
        self.x += 1;
        Ok(val)
    }

    fn buf(&mut self, n: usize) -> Result<&'a [u8], MsgPackError> {
        self.need(n)?;
        let bin = &self.data[self.x..self.x + n];
        self.x += n;
        Ok(bin)
    }

    fn u16(&mut self) -> Result<u16, MsgPackError> {
        let b = self.buf(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, MsgPackError> {
        let b = self.buf(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u64(&mut self) -> Result<u64, MsgPackError> {
        let b = self.buf(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn f32(&mut self) -> Result<f32, MsgPackError> {
        let b = self.buf(4)?;
        Ok(f32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn f64(&mut self) -> Result<f64, MsgPackError> {
        let b = self.buf(8)?;
        Ok(f64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn utf8(&mut self, n: usize) -> Result<String, MsgPackError> {
        let bytes = self.buf(n)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| MsgPackError::InvalidUtf8)
    }

    fn read_value(&mut self) -> Result<KeyedValue, MsgPackError> {
        let offset = self.x;
        let byte = self.u8()?;
        let value = match byte {
            0x00..=0x7f => KeyedValue::Integer(byte as i64),
            0x80..=0x8f => self.read_map((byte & 0x0f) as usize)?,
            0x90..=0x9f => self.read_array((byte & 0x0f) as usize)?,
            0xa0..=0xbf => KeyedValue::Str(self.utf8((byte & 0x1f) as usize)?),
            0xc0 => KeyedValue::Null,
            0xc1 => return Err(MsgPackError::InvalidByte(offset)),
            0xc2 => KeyedValue::Bool(false),
            0xc3 => KeyedValue::Bool(true),
            0xc4 => {
                let n = self.u8()? as usize;
                KeyedValue::Bytes(self.buf(n)?.to_vec())
            }
            0xc5 => {
                let n = self.u16()? as usize;
                KeyedValue::Bytes(self.buf(n)?.to_vec())
            }
            0xc6 => {
                let n = self.u32()? as usize;
                KeyedValue::Bytes(self.buf(n)?.to_vec())
            }
            0xc7 => {
                let n = self.u8()? as usize;
                self.read_ext(n)?
            }
            0xc8 => {
                let n = self.u16()? as usize;
                self.read_ext(n)?
            }
            0xc9 => {
                let n = self.u32()? as usize;
                self.read_ext(n)?
            }
            0xca => KeyedValue::Float(self.f32()? as f64),
            0xcb => KeyedValue::Float(self.f64()?),
            0xcc => KeyedValue::Integer(self.u8()? as i64),
            0xcd => KeyedValue::Integer(self.u16()? as i64),
            0xce => KeyedValue::Integer(self.u32()? as i64),
            0xcf => {
                let val = self.u64()?;
                match i64::try_from(val) {
                    Ok(i) => KeyedValue::Integer(i),
                    Err(_) => KeyedValue::UInteger(val),
                }
            }
            0xd0 => KeyedValue::Integer(self.u8()? as i8 as i64),
            0xd1 => KeyedValue::Integer(self.u16()? as i16 as i64),
            0xd2 => KeyedValue::Integer(self.u32()? as i32 as i64),
            0xd3 => KeyedValue::Integer(self.u64()? as i64),
            0xd4 => self.read_ext(1)?,
            0xd5 => self.read_ext(2)?,
            0xd6 => self.read_ext(4)?,
            0xd7 => self.read_ext(8)?,
            0xd8 => self.read_ext(16)?,
            0xd9 => {
                let n = self.u8()? as usize;
                KeyedValue::Str(self.utf8(n)?)
            }
            0xda => {
                let n = self.u16()? as usize;
                KeyedValue::Str(self.utf8(n)?)
            }
            0xdb => {
                let n = self.u32()? as usize;
                KeyedValue::Str(self.utf8(n)?)
            }
            0xdc => {
                let n = self.u16()? as usize;
                self.read_array(n)?
            }
            0xdd => {
                let n = self.u32()? as usize;
                self.read_array(n)?
            }
            0xde => {
                let n = self.u16()? as usize;
                self.read_map(n)?
            }
            0xdf => {
                let n = self.u32()? as usize;
                self.read_map(n)?
            }
            0xe0..=0xff => KeyedValue::Integer(byte as i8 as i64),
        };
        Ok(value)
    }

    fn read_array(&mut self, len: usize) -> Result<KeyedValue, MsgPackError> {
        let mut items = Vec::with_capacity(len.min(self.data.len() - self.x));
        for _ in 0..len {
            items.push(self.read_value()?);
        }
        Ok(KeyedValue::Array(items))
    }

    fn read_map(&mut self, len: usize) -> Result<KeyedValue, MsgPackError> {
        let mut entries = Vec::with_capacity(len.min(self.data.len() - self.x));
        for _ in 0..len {
            let key = self.read_key()?;
            let value = self.read_value()?;
            entries.push((key, value));
        }
        Ok(KeyedValue::Map(entries))
    }

    fn read_key(&mut self) -> Result<MapKey, MsgPackError> {
        match self.read_value()? {
            KeyedValue::Integer(i) if i >= 0 => Ok(MapKey::Index(i as u64)),
            KeyedValue::UInteger(u) => Ok(MapKey::Index(u)),
            KeyedValue::Str(s) => Ok(MapKey::Name(s)),
            _ => Err(MsgPackError::InvalidKey),
        }
    }

    fn read_ext(&mut self, len: usize) -> Result<KeyedValue, MsgPackError> {
        let tag = self.u8()? as i8;
        let data = self.buf(len)?.to_vec();
        Ok(KeyedValue::Ext(KeyedExtension::new(tag, data)))
    }
}
