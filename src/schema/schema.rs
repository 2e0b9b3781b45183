use indexmap::IndexMap;

use crate::{errors::{CopyError, Result}, schema::ColumnSchema};

/// Ordered, name-unique sequence of column descriptors.
///
/// Column position in the schema is the column index rows are read with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Map of column name -> descriptor, in column order
    columns: IndexMap<String, ColumnSchema>,
}

impl Schema {
    /// Build a schema from columns in order. Fails on a repeated name.
    pub fn try_new(columns: Vec<ColumnSchema>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(columns.len());
        for col in columns {
            if map.contains_key(&col.name) {
                return Err(CopyError::DuplicateColumn(col.name));
            }
            map.insert(col.name.clone(), col);
        }
        Ok(Self { columns: map })
    }

    pub fn try_find_by_name(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.get(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    pub fn column(&self, index: usize) -> Option<&ColumnSchema> {
        self.columns.get_index(index).map(|(_, col)| col)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &ColumnSchema> {
        self.columns.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn to_columns(&self) -> Vec<ColumnSchema> {
        self.columns.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataKind;

    #[test]
    fn lookup_by_name_and_position() {
        let s = Schema::try_new(vec![
            ColumnSchema::new("a", DataKind::Int32),
            ColumnSchema::new("b", DataKind::Text),
        ]).unwrap();

        assert_eq!(s.len(), 2);
        assert_eq!(s.index_of("b"), Some(1));
        assert_eq!(s.column(0).unwrap().name, "a");
        assert_eq!(s.try_find_by_name("b").unwrap().data_kind, DataKind::Text);
        assert!(s.try_find_by_name("B").is_none(), "lookup is exact-match");
        assert!(s.column(2).is_none());
        assert_eq!(s.names(), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Schema::try_new(vec![
            ColumnSchema::new("a", DataKind::Int32),
            ColumnSchema::new("a", DataKind::Text),
        ]).unwrap_err();
        assert!(matches!(err, CopyError::DuplicateColumn(name) if name == "a"));
    }
}
