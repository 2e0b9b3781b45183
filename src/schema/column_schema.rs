use crate::schema::{DataKind, Metadata};

/// Describes one column: its name, value representation, key-ness and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_kind: DataKind,
    pub is_key: bool,
    pub metadata: Metadata,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_kind: DataKind) -> Self {
        Self { name: name.into(), data_kind, is_key: false, metadata: Metadata::new() }
    }

    pub fn key(name: impl Into<String>, data_kind: DataKind) -> Self {
        Self { is_key: true, ..Self::new(name, data_kind) }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Same descriptor under another name. Kind, key-ness and metadata are kept verbatim.
    pub fn with_name(&self, name: impl Into<String>) -> ColumnSchema {
        ColumnSchema {
            name: name.into(),
            data_kind: self.data_kind.clone(),
            is_key: self.is_key,
            metadata: self.metadata.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rename_keeps_everything_but_the_name() {
        let col = ColumnSchema::key("id", DataKind::UInt32)
            .with_metadata(Metadata::new().with("key_count", DataKind::UInt64, json!(10)));

        let renamed = col.with_name("row_id");
        assert_eq!(renamed.name, "row_id");
        assert_eq!(renamed.data_kind, DataKind::UInt32);
        assert!(renamed.is_key);
        assert_eq!(renamed.metadata, col.metadata);
    }
}
