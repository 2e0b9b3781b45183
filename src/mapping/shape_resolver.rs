use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    errors::{CopyError, Result},
    mapping::ColumnMapping,
    schema::{ColumnSchema, Schema},
};

/// A column a projection adds, with where it comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedColumn {
    /// Output descriptor (renamed copy of the source descriptor)
    pub column: ColumnSchema,
    /// Index of the winning mapping in the mapping list
    pub mapping_index: usize,
    /// Index of the source column in the input schema
    pub source_index: usize,
}

/// Computes output shapes from input shapes and a mapping list. Never looks at rows.
pub struct ShapeResolver;

impl ShapeResolver {
    /// Input columns followed by the mapped columns.
    ///
    /// Sources are looked up in the original input, not in the shape being built,
    /// so a mapping can't read another mapping's output. An output name that is
    /// already present is replaced where it stands; new names are appended.
    pub fn resolve_shape(input: &[ColumnSchema], mappings: &[ColumnMapping]) -> Result<Vec<ColumnSchema>> {
        let by_name: HashMap<&str, &ColumnSchema> =
            input.iter().map(|c| (c.name.as_str(), c)).collect();

        let mut shape: IndexMap<String, ColumnSchema> = input
            .iter()
            .map(|c| (c.name.clone(), c.clone()))
            .collect();

        for m in mappings {
            let src = by_name.get(m.source.as_str()).ok_or_else(|| CopyError::SchemaMismatch {
                source_column: m.source.clone(),
                output: m.output.clone(),
            })?;
            shape.insert(m.output.clone(), src.with_name(&m.output));
        }

        Ok(shape.into_values().collect())
    }

    pub fn resolve_schema(input: &Schema, mappings: &[ColumnMapping]) -> Result<Schema> {
        let shape = Self::resolve_shape(&input.to_columns(), mappings)?;
        Schema::try_new(shape)
    }

    /// Only the columns the mappings add, one per distinct output name.
    ///
    /// Same replacement rule as [`ShapeResolver::resolve_shape`]: the last mapping for a
    /// name wins, at the position of the name's first occurrence.
    pub fn resolve_added(input: &Schema, mappings: &[ColumnMapping]) -> Result<Vec<AddedColumn>> {
        let mut added: IndexMap<&str, AddedColumn> = IndexMap::with_capacity(mappings.len());

        for (mapping_index, m) in mappings.iter().enumerate() {
            let source_index = input.index_of(&m.source).ok_or_else(|| CopyError::SchemaMismatch {
                source_column: m.source.clone(),
                output: m.output.clone(),
            })?;
            let src = input.column(source_index).ok_or_else(|| {
                CopyError::Internal(format!("index {source_index} for '{}' out of range", m.source))
            })?;

            let column = AddedColumn { column: src.with_name(&m.output), mapping_index, source_index };
            if let Some(prev) = added.insert(m.output.as_str(), column) {
                tracing::debug!(
                    output = %m.output,
                    replaced_mapping = prev.mapping_index,
                    by_mapping = mapping_index,
                    "output name repeated, later mapping replaces earlier one"
                );
            }
            tracing::trace!(source = %m.source, output = %m.output, source_index, "resolved mapping");
        }

        Ok(added.into_values().collect())
    }
}
