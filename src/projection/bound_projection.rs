use std::{collections::BTreeSet, sync::Arc};

use crate::{
    accessor::{Accessor, AccessorRegistry, RowCursor},
    errors::{CopyError, Result},
    mapping::{AddedColumn, ColumnMapping, ShapeResolver},
    projection::RowSession,
    schema::{ColumnSchema, Schema},
};

/// A mapping list resolved against one concrete input schema.
///
/// Holds no row data: only descriptors and the input indices found at bind
/// time. Immutable once built; binding to another schema means building a new one.
#[derive(Debug, Clone)]
pub struct BoundProjection {
    mappings: Arc<[ColumnMapping]>,
    input: Arc<Schema>,
    /// One entry per distinct output name, in output order
    added: Vec<AddedColumn>,
    /// Input columns plus added columns
    output: Schema,
}

impl BoundProjection {
    /// Bind against `input`, checking every copied kind with the process-wide registry.
    pub fn bind(mappings: Arc<[ColumnMapping]>, input: Arc<Schema>) -> Result<Self> {
        Self::bind_with(AccessorRegistry::global(), mappings, input)
    }

    /// Bind against `input`. Every added column's kind must have a constructor
    /// in `registry`.
    pub fn bind_with(
        registry: &AccessorRegistry,
        mappings: Arc<[ColumnMapping]>,
        input: Arc<Schema>,
    ) -> Result<Self> {
        let added = ShapeResolver::resolve_added(&input, &mappings)?;
        if let Some(a) = added.iter().find(|a| !registry.supports(&a.column.data_kind)) {
            return Err(CopyError::UnsupportedType {
                kind: a.column.data_kind.clone(),
                column: a.column.name.clone(),
            });
        }
        let output = ShapeResolver::resolve_schema(&input, &mappings)?;

        tracing::debug!(
            input_columns = input.len(),
            mappings = mappings.len(),
            added_columns = added.len(),
            output_columns = output.len(),
            "bound column copy projection"
        );
        Ok(Self { mappings, input, added, output })
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn input_schema(&self) -> &Arc<Schema> {
        &self.input
    }

    /// Full output schema: input columns followed by the copies, with a copy
    /// named like an input column taking that column's place.
    pub fn output_schema(&self) -> &Schema {
        &self.output
    }

    /// Number of columns the projection adds.
    pub fn column_count(&self) -> usize {
        self.added.len()
    }

    pub fn output_columns(&self) -> impl ExactSizeIterator<Item = &ColumnSchema> {
        self.added.iter().map(|a| &a.column)
    }

    pub fn column_descriptor(&self, i: usize) -> Result<&ColumnSchema> {
        self.added_column(i).map(|a| &a.column)
    }

    pub fn index_of(&self, output: &str) -> Option<usize> {
        self.added.iter().position(|a| a.column.name == output)
    }

    /// Mapping that produces added column `i`.
    pub fn mapping(&self, i: usize) -> Result<&ColumnMapping> {
        let added = self.added_column(i)?;
        self.mappings.get(added.mapping_index).ok_or_else(|| {
            CopyError::Internal(format!("mapping index {} out of range", added.mapping_index))
        })
    }

    pub fn source_index(&self, i: usize) -> Result<usize> {
        self.added_column(i).map(|a| a.source_index)
    }

    /// Input columns needed to serve the added columns `active` selects, sorted.
    pub fn input_dependencies(&self, active: impl Fn(usize) -> bool) -> Vec<usize> {
        self.added
            .iter()
            .enumerate()
            .filter(|(i, _)| active(*i))
            .map(|(_, a)| a.source_index)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Accessor for added column `i`, built with the process-wide registry.
    pub fn make_row_accessor<'a>(&self, i: usize, cursor: &'a dyn RowCursor) -> Result<Accessor<'a>> {
        self.make_row_accessor_with(AccessorRegistry::global(), i, cursor)
    }

    pub fn make_row_accessor_with<'a>(
        &self,
        registry: &AccessorRegistry,
        i: usize,
        cursor: &'a dyn RowCursor,
    ) -> Result<Accessor<'a>> {
        let mapping = self.mapping(i)?;
        // binding already checked every source, a miss here means the projection is corrupt
        let index = self.input.index_of(&mapping.source).ok_or_else(|| {
            CopyError::Internal(format!(
                "source column '{}' vanished from bound input schema", mapping.source
            ))
        })?;
        let source = self.input.column(index).ok_or_else(|| {
            CopyError::Internal(format!("input column index {index} out of range"))
        })?;

        registry.make_accessor(&source.data_kind, index, &mapping.output, cursor)
    }

    /// New row-access session over `cursor`, with its own accessor cache.
    pub fn session<'a>(&'a self, cursor: &'a dyn RowCursor) -> RowSession<'a> {
        RowSession::new(self, cursor)
    }

    fn added_column(&self, i: usize) -> Result<&AddedColumn> {
        self.added.get(i).ok_or_else(|| {
            CopyError::invalid_argument(format!(
                "column index {i} out of range, projection has {} columns", self.added.len()
            ))
        })
    }
}
