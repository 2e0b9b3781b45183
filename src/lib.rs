pub mod errors;
pub use errors::{CopyError, ErrorKind, Result};

pub mod schema;
pub use schema::{ColumnSchema, DataKind, Metadata, MetadataEntry, Schema};

pub mod mapping;
pub use mapping::{ColumnMapping, MappingCodec, ShapeResolver, VersionHeader, VersionInfo};

pub mod accessor;
pub use accessor::{Accessor, AccessorRegistry, Getter, ReadValue, RowCursor};

pub mod projection;
pub use projection::{BoundProjection, Row, RowSession};

pub mod transform;
pub use transform::{CopyColumnsOptions, CopyColumnsTransform, LoaderRegistry, RowTransform, COPY_COLUMNS_VERSION};
