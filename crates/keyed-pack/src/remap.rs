//! Keyed-tree remapper: integer map keys become human-readable names.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::key_table::KeyTable;
use crate::keyed_value::{KeyedValue, MapKey};

/// Prefix for the JSON rendering of binary payloads.
pub const BINARY_URI_PREFIX: &str = "data:application/octet-stream;base64,";

/// Reconstructs a plain JSON tree from a decoded compact payload.
///
/// Arrays stay positional; map keys resolve through `table`, with the same
/// flat table reused at every nesting level (the wire format interns keys of
/// the whole tree into one table). A key index the table cannot name keeps
/// its decimal form. String keys pass through untouched, which also makes
/// the transform one-way: remapping an already-named tree leaves it alone.
///
/// Never fails. Renaming is cosmetic, so anything the table cannot resolve
/// degrades to the key as written.
pub fn remap(value: &KeyedValue, table: &KeyTable) -> JsonValue {
    match value {
        KeyedValue::Null => JsonValue::Null,
        KeyedValue::Bool(b) => JsonValue::Bool(*b),
        KeyedValue::Integer(i) => JsonValue::Number(Number::from(*i)),
        KeyedValue::UInteger(u) => JsonValue::Number(Number::from(*u)),
        // Non-finite floats have no JSON form.
        KeyedValue::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        KeyedValue::Str(s) => JsonValue::String(s.clone()),
        KeyedValue::Bytes(data) => JsonValue::String(binary_uri(data)),
        KeyedValue::Ext(ext) => JsonValue::String(binary_uri(&ext.data)),
        KeyedValue::Array(items) => {
            JsonValue::Array(items.iter().map(|item| remap(item, table)).collect())
        }
        KeyedValue::Map(entries) => {
            let mut out = JsonMap::with_capacity(entries.len());
            for (key, val) in entries {
                let name = match key {
                    MapKey::Index(i) => table
                        .name(*i)
                        .map_or_else(|| i.to_string(), str::to_owned),
                    MapKey::Name(s) => s.clone(),
                };
                out.insert(name, remap(val, table));
            }
            JsonValue::Object(out)
        }
    }
}

fn binary_uri(data: &[u8]) -> String {
    let mut s = String::with_capacity(BINARY_URI_PREFIX.len() + (data.len() + 2) / 3 * 4);
    s.push_str(BINARY_URI_PREFIX);
    BASE64.encode_string(data, &mut s);
    s
}
