use std::{
    fs,
    io::{BufWriter, Read, Write},
    path::Path,
    sync::Arc,
};

use crate::{
    accessor::AccessorRegistry,
    errors::{CopyError, Result},
    mapping::{ColumnMapping, MappingCodec, ShapeResolver, VersionInfo},
    projection::BoundProjection,
    schema::Schema,
    transform::{CopyColumnsOptions, RowTransform},
};

/// Header written by, and accepted from, the column copy transform.
pub const COPY_COLUMNS_VERSION: VersionInfo =
    VersionInfo::new(b"COPYCOLT", 0x0001_0001, 0x0001_0001, 0x0001_0001, "CopyTransform");

/// Exposes input columns under new names.
///
/// Holds only the ordered mapping list, fixed at construction. The same
/// transform can be attached to any number of schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyColumnsTransform {
    mappings: Arc<[ColumnMapping]>,
}

impl CopyColumnsTransform {
    pub fn new(mappings: Vec<ColumnMapping>) -> Result<Self> {
        if mappings.is_empty() {
            return Err(CopyError::invalid_argument("at least one column mapping is required"));
        }
        for m in &mappings {
            m.validate()?;
        }
        Ok(Self { mappings: mappings.into() })
    }

    /// Build from `(source, output)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        Self::new(pairs.iter().map(|&p| ColumnMapping::from(p)).collect())
    }

    pub fn from_options(options: &CopyColumnsOptions) -> Result<Self> {
        Self::new(options.columns.clone())
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn codec() -> MappingCodec {
        MappingCodec::new(COPY_COLUMNS_VERSION)
    }

    pub fn output_shape(&self, input: &Schema) -> Result<Schema> {
        ShapeResolver::resolve_schema(input, &self.mappings)
    }

    pub fn attach(&self, input: Arc<Schema>) -> Result<BoundProjection> {
        BoundProjection::bind(Arc::clone(&self.mappings), input)
    }

    /// Attach, accepting only the column kinds `registry` can read.
    pub fn attach_with(&self, registry: &AccessorRegistry, input: Arc<Schema>) -> Result<BoundProjection> {
        BoundProjection::bind_with(registry, Arc::clone(&self.mappings), input)
    }

    pub fn save(&self) -> Result<Vec<u8>> {
        Self::codec().encode(&self.mappings)
    }

    pub fn save_to<W: Write>(&self, w: &mut W) -> Result<()> {
        Self::codec().write_mappings(w, &self.mappings)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.save_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(bytes: &[u8]) -> Result<Self> {
        Self::from_decoded(Self::codec().decode(bytes)?)
    }

    pub fn load_from<R: Read>(r: &mut R) -> Result<Self> {
        Self::from_decoded(Self::codec().read_mappings(r)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::load(&bytes)
    }

    /// Loader entry for [`LoaderRegistry`](crate::transform::LoaderRegistry).
    pub fn load_boxed(bytes: &[u8]) -> Result<Box<dyn RowTransform>> {
        Ok(Box::new(Self::load(bytes)?))
    }

    // the codec guarantees non-empty names; an empty list can only come from a foreign writer
    fn from_decoded(mappings: Vec<ColumnMapping>) -> Result<Self> {
        if mappings.is_empty() {
            return Err(CopyError::format("persisted column copy transform has no mappings"));
        }
        Ok(Self { mappings: mappings.into() })
    }
}

impl RowTransform for CopyColumnsTransform {
    fn loader_name(&self) -> &'static str {
        COPY_COLUMNS_VERSION.loader_name
    }

    fn signature(&self) -> [u8; 8] {
        COPY_COLUMNS_VERSION.signature
    }

    fn output_shape(&self, input: &Schema) -> Result<Schema> {
        CopyColumnsTransform::output_shape(self, input)
    }

    fn save(&self) -> Result<Vec<u8>> {
        CopyColumnsTransform::save(self)
    }

    fn attach(&self, input: Arc<Schema>) -> Result<BoundProjection> {
        CopyColumnsTransform::attach(self, input)
    }
}
