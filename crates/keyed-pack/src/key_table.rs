//! Positional key-name table shipped alongside compact payloads.

use std::collections::HashMap;

use crate::keyed_value::{KeyedValue, MapKey};

/// Ordered table mapping integer positions to field names.
///
/// A table is optional by design: renaming degrades silently wherever the
/// table has no usable entry, so a missing or malformed table simply leaves
/// integer keys in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTable {
    names: Vec<Option<String>>,
}

impl KeyTable {
    /// An empty table; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table where position `i` names key index `i`.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(|s| Some(s.into())).collect(),
        }
    }

    /// Builds a table from the decoded side-table value.
    ///
    /// Degrades instead of failing: a value that is not an array yields an
    /// empty table, and a non-string entry yields a nameless position (so
    /// later positions keep their alignment).
    pub fn from_value(value: &KeyedValue) -> Self {
        let KeyedValue::Array(entries) = value else {
            return Self::empty();
        };
        let names = entries
            .iter()
            .map(|entry| match entry {
                KeyedValue::Str(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        Self { names }
    }

    /// Looks up the name for a key index. `None` means the key stays numeric.
    pub fn name(&self, index: u64) -> Option<&str> {
        let i = usize::try_from(index).ok()?;
        self.names.get(i)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Encoder-side key interner.
///
/// First-seen keys are appended; repeats return the existing index. One
/// builder spans the whole tree, producing the single flat table the wire
/// format expects.
#[derive(Debug, Default)]
pub struct KeyTableBuilder {
    names: Vec<String>,
    index: HashMap<String, u64>,
}

impl KeyTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table index for `name`, interning it if unseen.
    pub fn intern(&mut self, name: &str) -> MapKey {
        if let Some(&i) = self.index.get(name) {
            return MapKey::Index(i);
        }
        let i = self.names.len() as u64;
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), i);
        MapKey::Index(i)
    }

    /// Emits the table in its wire form: an array of name strings.
    pub fn into_value(self) -> KeyedValue {
        KeyedValue::Array(self.names.into_iter().map(KeyedValue::Str).collect())
    }
}
