//! MessagePack encoder for [`KeyedValue`] trees.

use crate::keyed_value::{KeyedExtension, KeyedValue, MapKey};

/// MessagePack encoder. Emits the smallest form for every value; floats are
/// always written as float64.
pub struct MsgPackEncoder {
    out: Vec<u8>,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(&mut self, value: &KeyedValue) -> Vec<u8> {
        self.out.clear();
        self.write_value(value);
        std::mem::take(&mut self.out)
    }

    fn write_value(&mut self, value: &KeyedValue) {
        match value {
            KeyedValue::Null => self.out.push(0xc0),
            KeyedValue::Bool(false) => self.out.push(0xc2),
            KeyedValue::Bool(true) => self.out.push(0xc3),
            KeyedValue::Integer(i) => self.write_integer(*i),
            KeyedValue::UInteger(u) => self.write_uinteger(*u),
            KeyedValue::Float(f) => {
                self.out.push(0xcb);
                self.out.extend_from_slice(&f.to_be_bytes());
            }
            KeyedValue::Str(s) => self.write_str(s),
            KeyedValue::Bytes(data) => self.write_bytes(data),
            KeyedValue::Array(items) => {
                self.write_array_header(items.len());
                for item in items {
                    self.write_value(item);
                }
            }
            KeyedValue::Map(entries) => {
                self.write_map_header(entries.len());
                for (key, val) in entries {
                    match key {
                        MapKey::Index(i) => self.write_uinteger(*i),
                        MapKey::Name(s) => self.write_str(s),
                    }
                    self.write_value(val);
                }
            }
            KeyedValue::Ext(ext) => self.write_ext(ext),
        }
    }

    fn write_integer(&mut self, i: i64) {
        if i >= 0 {
            self.write_uinteger(i as u64);
        } else if i >= -32 {
            self.out.push(i as i8 as u8);
        } else if i >= i8::MIN as i64 {
            self.out.push(0xd0);
            self.out.push(i as i8 as u8);
        } else if i >= i16::MIN as i64 {
            self.out.push(0xd1);
            self.out.extend_from_slice(&(i as i16).to_be_bytes());
        } else if i >= i32::MIN as i64 {
            self.out.push(0xd2);
            self.out.extend_from_slice(&(i as i32).to_be_bytes());
        } else {
            self.out.push(0xd3);
            self.out.extend_from_slice(&i.to_be_bytes());
        }
    }

    fn write_uinteger(&mut self, u: u64) {
        if u <= 0x7f {
            self.out.push(u as u8);
        } else if u <= u8::MAX as u64 {
            self.out.push(0xcc);
            self.out.push(u as u8);
        } else if u <= u16::MAX as u64 {
            self.out.push(0xcd);
            self.out.extend_from_slice(&(u as u16).to_be_bytes());
        } else if u <= u32::MAX as u64 {
            self.out.push(0xce);
            self.out.extend_from_slice(&(u as u32).to_be_bytes());
        } else {
            self.out.push(0xcf);
            self.out.extend_from_slice(&u.to_be_bytes());
        }
    }

    fn write_str(&mut self, s: &str) {
        let len = s.len();
        if len <= 0x1f {
            self.out.push(0xa0 | len as u8);
        } else if len <= u8::MAX as usize {
            self.out.push(0xd9);
            self.out.push(len as u8);
        } else if len <= u16::MAX as usize {
            self.out.push(0xda);
            self.out.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            self.out.push(0xdb);
            self.out.extend_from_slice(&(len as u32).to_be_bytes());
        }
        self.out.extend_from_slice(s.as_bytes());
    }

    fn write_bytes(&mut self, data: &[u8]) {
        let len = data.len();
        if len <= u8::MAX as usize {
            self.out.push(0xc4);
            self.out.push(len as u8);
        } else if len <= u16::MAX as usize {
            self.out.push(0xc5);
            self.out.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            self.out.push(0xc6);
            self.out.extend_from_slice(&(len as u32).to_be_bytes());
        }
        self.out.extend_from_slice(data);
    }

    fn write_array_header(&mut self, len: usize) {
        if len <= 0x0f {
            self.out.push(0x90 | len as u8);
        } else if len <= u16::MAX as usize {
            self.out.push(0xdc);
            self.out.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            self.out.push(0xdd);
            self.out.extend_from_slice(&(len as u32).to_be_bytes());
        }
    }

    fn write_map_header(&mut self, len: usize) {
        if len <= 0x0f {
            self.out.push(0x80 | len as u8);
        } else if len <= u16::MAX as usize {
            self.out.push(0xde);
            self.out.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            self.out.push(0xdf);
            self.out.extend_from_slice(&(len as u32).to_be_bytes());
        }
    }

    fn write_ext(&mut self, ext: &KeyedExtension) {
        match ext.data.len() {
            1 => self.out.push(0xd4),
            2 => self.out.push(0xd5),
            4 => self.out.push(0xd6),
            8 => self.out.push(0xd7),
            16 => self.out.push(0xd8),
            len if len <= u8::MAX as usize => {
                self.out.push(0xc7);
                self.out.push(len as u8);
            }
            len if len <= u16::MAX as usize => {
                self.out.push(0xc8);
                self.out.extend_from_slice(&(len as u16).to_be_bytes());
            }
            len => {
                self.out.push(0xc9);
                self.out.extend_from_slice(&(len as u32).to_be_bytes());
            }
        }
        self.out.push(ext.tag as u8);
        self.out.extend_from_slice(&ext.data);
    }
}
