//! [`KeyedValue`], the tagged tree of decoded MessagePack values.

use serde_json::Value as JsonValue;

/// A decoded MessagePack value, prior to key renaming.
///
/// Composites carry their wire kind explicitly: an [`Array`] is a positional
/// sequence and is never renamed, a [`Map`] is a candidate for key-table
/// renaming. The distinction comes from the decoder, never from inspecting
/// key contiguity.
///
/// [`Array`]: KeyedValue::Array
/// [`Map`]: KeyedValue::Map
#[derive(Debug, Clone, PartialEq)]
pub enum KeyedValue {
    Null,
    Bool(bool),
    Integer(i64),
    UInteger(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<KeyedValue>),
    Map(Vec<(MapKey, KeyedValue)>),
    Ext(KeyedExtension),
}

/// A map key as it appears on the wire.
///
/// The compact format interns object keys into a side table, so most maps
/// arrive keyed by small integers. Maps produced after interning (such as
/// type-tagged wrapper dicts) keep their string keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapKey {
    Index(u64),
    Name(String),
}

/// A MessagePack extension: type tag plus opaque payload.
///
/// The compact envelope format never emits extensions itself; they are
/// carried through so foreign payloads decode without loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedExtension {
    pub tag: i8,
    pub data: Vec<u8>,
}

impl KeyedExtension {
    pub fn new(tag: i8, data: Vec<u8>) -> Self {
        Self { tag, data }
    }
}

impl KeyedValue {
    /// Returns `true` for non-composite values.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, KeyedValue::Array(_) | KeyedValue::Map(_))
    }
}

impl From<JsonValue> for KeyedValue {
    /// Converts plain JSON into a [`KeyedValue`] with string-keyed maps.
    ///
    /// Key interning is the envelope encoder's job; this conversion keeps
    /// every object key as [`MapKey::Name`].
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Null => KeyedValue::Null,
            JsonValue::Bool(b) => KeyedValue::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    KeyedValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    KeyedValue::UInteger(u)
                } else {
                    KeyedValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => KeyedValue::Str(s),
            JsonValue::Array(items) => {
                KeyedValue::Array(items.into_iter().map(KeyedValue::from).collect())
            }
            JsonValue::Object(fields) => KeyedValue::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (MapKey::Name(k), KeyedValue::from(v)))
                    .collect(),
            ),
        }
    }
}
