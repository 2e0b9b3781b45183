use serde_json::Map;

use crate::{
    accessor::{Accessor, AccessorRegistry, RowCursor},
    errors::{CopyError, Result},
    projection::{BoundProjection, Row},
};

/// Row access over one cursor.
///
/// Accessors are built the first time a column is asked for and reused for
/// every later row. Sessions share nothing: parallel readers each open their
/// own session on their own cursor.
pub struct RowSession<'a> {
    projection: &'a BoundProjection,
    cursor: &'a dyn RowCursor,
    registry: &'a AccessorRegistry,
    accessors: Vec<Option<Accessor<'a>>>,
}

impl<'a> RowSession<'a> {
    pub fn new(projection: &'a BoundProjection, cursor: &'a dyn RowCursor) -> Self {
        Self::with_registry(projection, cursor, AccessorRegistry::global())
    }

    pub fn with_registry(
        projection: &'a BoundProjection,
        cursor: &'a dyn RowCursor,
        registry: &'a AccessorRegistry,
    ) -> Self {
        let mut accessors = Vec::with_capacity(projection.column_count());
        accessors.resize_with(projection.column_count(), || None);
        Self { projection, cursor, registry, accessors }
    }

    pub fn projection(&self) -> &'a BoundProjection {
        self.projection
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Accessor for added column `i`, built on first use.
    pub fn accessor(&mut self, i: usize) -> Result<&Accessor<'a>> {
        let slot = self.accessors.get_mut(i).ok_or_else(|| {
            CopyError::invalid_argument(format!("column index {i} out of range"))
        })?;
        if slot.is_none() {
            let acc = self.projection.make_row_accessor_with(self.registry, i, self.cursor)?;
            tracing::trace!(column = i, kind = %acc.data_kind(), "built row accessor");
            *slot = Some(acc);
        }
        slot.as_ref().ok_or_else(|| CopyError::Internal(format!("accessor {i} missing after build")))
    }

    pub fn accessor_by_name(&mut self, output: &str) -> Result<&Accessor<'a>> {
        let i = self.projection.index_of(output).ok_or_else(|| {
            CopyError::invalid_argument(format!("no output column named '{output}'"))
        })?;
        self.accessor(i)
    }

    /// Build every accessor up front, surfacing kinds the session's registry
    /// cannot read before the first row.
    pub fn bind_all(&mut self) -> Result<()> {
        for i in 0..self.accessors.len() {
            self.accessor(i)?;
        }
        Ok(())
    }

    /// Number of accessors built so far.
    pub fn bound_count(&self) -> usize {
        self.accessors.iter().filter(|a| a.is_some()).count()
    }

    /// Current row's added columns as a JSON row keyed by output name.
    pub fn materialize(&mut self) -> Result<Row> {
        self.bind_all()?;
        let mut map = Map::with_capacity(self.accessors.len());
        for (column, acc) in self.projection.output_columns().zip(self.accessors.iter()) {
            if let Some(acc) = acc {
                map.insert(column.name.clone(), acc.read_json());
            }
        }
        Ok(Row(map))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        _tests::fixtures::{mappings, people_cursor, people_schema},
        errors::ErrorKind,
        schema::{ColumnSchema, DataKind, Schema},
    };
    use serde_json::json;

    fn projection(pairs: &[(&str, &str)]) -> BoundProjection {
        BoundProjection::bind(mappings(pairs).into(), Arc::new(people_schema())).unwrap()
    }

    #[test]
    fn accessors_are_built_lazily_and_cached() {
        let p = projection(&[("age", "years"), ("name", "label")]);
        let cursor = people_cursor();
        let mut session = p.session(&cursor);
        assert_eq!(session.bound_count(), 0);

        session.accessor(1).unwrap();
        assert_eq!(session.bound_count(), 1);
        session.accessor(1).unwrap();
        assert_eq!(session.bound_count(), 1);

        session.accessor_by_name("years").unwrap();
        assert_eq!(session.bound_count(), 2);
    }

    #[test]
    fn materialize_reads_current_row() {
        let p = projection(&[("age", "years"), ("tags", "labels"), ("id", "key")]);
        let cursor = people_cursor();
        let mut session = p.session(&cursor);

        let mut rows = Vec::new();
        while cursor.advance() {
            rows.push(session.materialize().unwrap().into_value());
        }

        assert_eq!(rows, vec![
            json!({"years": 29, "labels": ["vip"], "key": 1}),
            json!({"years": 34, "labels": [], "key": 2}),
            json!({"years": 41, "labels": ["new", "north"], "key": 3}),
        ]);
        assert_eq!(session.position(), 2);
    }

    #[test]
    fn sessions_are_independent() {
        let p = projection(&[("name", "label")]);
        let (c1, c2) = (people_cursor(), people_cursor());
        let mut s1 = p.session(&c1);
        let mut s2 = p.session(&c2);

        c1.advance();
        c2.advance();
        c2.advance();

        let a1 = s1.accessor(0).unwrap().typed::<String>().unwrap()();
        let a2 = s2.accessor(0).unwrap().typed::<String>().unwrap()();
        assert_eq!(a1, "Alice Johnson");
        assert_eq!(a2, "Bruno Martins");
    }

    #[test]
    fn unknown_names_and_indices_are_rejected() {
        let p = projection(&[("name", "label")]);
        let cursor = people_cursor();
        let mut session = p.session(&cursor);
        assert_eq!(session.accessor_by_name("name").unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(session.accessor(5).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn bind_all_surfaces_kinds_missing_from_session_registry() {
        let schema = Schema::try_new(vec![
            ColumnSchema::new("a", DataKind::Int32),
            ColumnSchema::new("flags", DataKind::vector(DataKind::Bool)),
        ]).unwrap();
        let p = BoundProjection::bind(mappings(&[("a", "x"), ("flags", "f")]).into(), Arc::new(schema)).unwrap();

        let mut ints_only = AccessorRegistry::new();
        ints_only.register(DataKind::Int32, AccessorRegistry::global().get(&DataKind::Int32).unwrap());
        let cursor = people_cursor();
        let mut session = RowSession::with_registry(&p, &cursor, &ints_only);
        assert_eq!(session.bind_all().unwrap_err().kind(), ErrorKind::UnsupportedType);
        assert_eq!(session.bound_count(), 1);
    }

    #[test]
    fn custom_registry_limits_supported_kinds() {
        let p = projection(&[("age", "years")]);
        let cursor = people_cursor();
        let empty = AccessorRegistry::new();
        let mut session = RowSession::with_registry(&p, &cursor, &empty);
        assert_eq!(session.accessor(0).unwrap_err().kind(), ErrorKind::UnsupportedType);
    }
}
