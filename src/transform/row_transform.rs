use std::{fmt, sync::Arc};

use crate::{errors::Result, projection::BoundProjection, schema::Schema};

/// A persisted, schema-independent row transform.
///
/// Implementations are immutable and can be shared freely between threads;
/// every `attach` produces an independent [`BoundProjection`].
pub trait RowTransform: Send + Sync + fmt::Debug {
    /// Name the loader registry knows this transform by.
    fn loader_name(&self) -> &'static str;

    fn signature(&self) -> [u8; 8];

    /// Output schema for `input`, without touching rows.
    fn output_shape(&self, input: &Schema) -> Result<Schema>;

    fn save(&self) -> Result<Vec<u8>>;

    fn attach(&self, input: Arc<Schema>) -> Result<BoundProjection>;
}
