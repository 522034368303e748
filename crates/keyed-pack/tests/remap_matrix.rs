use keyed_pack::{remap, KeyTable, KeyedValue, MapKey};
use serde_json::json;

fn entry(i: u64, v: KeyedValue) -> (MapKey, KeyedValue) {
    (MapKey::Index(i), v)
}

#[test]
fn remap_matrix_sequences_stay_positional() {
    let table = KeyTable::from_names(["id", "name"]);
    let value = KeyedValue::Array(vec![
        KeyedValue::Integer(1),
        KeyedValue::Str("two".into()),
        KeyedValue::Map(vec![entry(1, KeyedValue::Bool(true))]),
    ]);
    let out = remap(&value, &table);
    // Same length, same order, elements remapped; no positional renaming
    assert_eq!(out, json!([1, "two", {"name": true}]));
}

#[test]
fn remap_matrix_flat_table_reused_at_every_level() {
    // One table serves the whole tree: the wire producer interns keys of
    // nested maps into the same side table as the root's.
    let table = KeyTable::from_names(["list"]);
    let value = KeyedValue::Map(vec![entry(
        0,
        KeyedValue::Array(vec![
            KeyedValue::Integer(1),
            KeyedValue::Map(vec![entry(0, KeyedValue::Str("n".into()))]),
        ]),
    )]);
    let out = remap(&value, &table);
    assert_eq!(out, json!({"list": [1, {"list": "n"}]}));
}

#[test]
fn remap_matrix_string_keys_pass_through() {
    // Maps that kept their string keys (type-tagged wrapper dicts) are left
    // alone even when the table could rename their positions.
    let table = KeyTable::from_names(["__class__", "as_str"]);
    let value = KeyedValue::Map(vec![
        (
            MapKey::Name("__class__".into()),
            KeyedValue::Str("datetime".into()),
        ),
        (
            MapKey::Name("as_str".into()),
            KeyedValue::Str("2020-01-01T00:00:00".into()),
        ),
    ]);
    assert_eq!(
        remap(&value, &table),
        json!({"__class__": "datetime", "as_str": "2020-01-01T00:00:00"})
    );
}

#[test]
fn remap_matrix_one_way_transform() {
    // After one pass all map keys are strings; a second pass over an
    // equivalent string-keyed tree changes nothing, whatever the table says.
    let table = KeyTable::from_names(["id", "name"]);
    let first = remap(
        &KeyedValue::Map(vec![entry(0, KeyedValue::Integer(9))]),
        &table,
    );
    assert_eq!(first, json!({"id": 9}));

    let renamed = KeyedValue::Map(vec![(MapKey::Name("id".into()), KeyedValue::Integer(9))]);
    let second = remap(&renamed, &table);
    assert_eq!(second, first);
}

#[test]
fn remap_matrix_missing_table_keeps_integer_keys() {
    let value = KeyedValue::Map(vec![
        entry(0, KeyedValue::Str("a".into())),
        entry(2, KeyedValue::Str("b".into())),
    ]);
    let out = remap(&value, &KeyTable::empty());
    assert_eq!(out, json!({"0": "a", "2": "b"}));
}

#[test]
fn remap_matrix_degraded_table_positions_keep_alignment() {
    // Entry 1 of the table is malformed; position 2 must still resolve.
    let wire_table = KeyedValue::Array(vec![
        KeyedValue::Str("id".into()),
        KeyedValue::Null,
        KeyedValue::Str("tier".into()),
    ]);
    let table = KeyTable::from_value(&wire_table);
    let value = KeyedValue::Map(vec![
        entry(0, KeyedValue::Integer(10)),
        entry(1, KeyedValue::Bool(false)),
        entry(2, KeyedValue::Integer(4)),
    ]);
    assert_eq!(
        remap(&value, &table),
        json!({"id": 10, "1": false, "tier": 4})
    );
}
