use serde::{Deserialize, Serialize};

use crate::errors::{CopyError, Result};

/// One `source -> output` column copy.
///
/// Serialized as `{ "name": <output>, "source": <source> }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Name the copied column is exposed under
    #[serde(rename = "name")]
    pub output: String,
    /// Input column the values are read from
    pub source: String,
}

impl ColumnMapping {
    /// Copy of `source` exposed as `output`.
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self { output: output.into(), source: source.into() }
    }

    /// Both names must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.output.is_empty() {
            return Err(CopyError::invalid_argument(format!(
                "empty output name for source column '{}'", self.source
            )));
        }
        if self.source.is_empty() {
            return Err(CopyError::invalid_argument(format!(
                "empty source name for output column '{}'", self.output
            )));
        }
        Ok(())
    }
}

impl From<(&str, &str)> for ColumnMapping {
    /// `(source, output)`, same order as [`ColumnMapping::new`].
    fn from((source, output): (&str, &str)) -> Self {
        ColumnMapping::new(source, output)
    }
}
