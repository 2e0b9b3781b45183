use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::DataKind;

/// One metadata value attached to a column.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub kind: DataKind,
    pub value: Value,
}

/// Ordered set of `(name, kind, value)` triples attached to a column.
///
/// Names are unique; re-inserting a name replaces its entry but keeps the
/// position it was first inserted at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: IndexMap<String, MetadataEntry>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, kind: DataKind, value: Value) -> Self {
        self.insert(name, kind, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: DataKind, value: Value) {
        self.entries.insert(name.into(), MetadataEntry { kind, value });
    }

    pub fn get(&self, name: &str) -> Option<&MetadataEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
