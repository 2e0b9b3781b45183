use serde::{Deserialize, Serialize};

use crate::{errors::Result, mapping::ColumnMapping};

/// User-facing options of the column copy transform.
///
/// Loadable from JSON:
///
/// ```json
/// { "columns": [ { "name": "x", "source": "a" }, { "name": "y", "source": "b" } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopyColumnsOptions {
    /// Columns to copy, in order. `name` is the output, `source` the input column.
    #[serde(default)]
    pub columns: Vec<ColumnMapping>,
}

impl CopyColumnsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `source` exposed as `output`.
    pub fn column(mut self, source: &str, output: &str) -> Self {
        self.columns.push(ColumnMapping::new(source, output));
        self
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn parse_columns_from_json() {
        let opts = CopyColumnsOptions::from_json(
            r#"{"columns":[{"name":"x","source":"a"},{"name":"y","source":"b"}]}"#,
        ).unwrap();
        assert_eq!(opts, CopyColumnsOptions::new().column("a", "x").column("b", "y"));
    }

    #[test]
    fn missing_columns_default_to_empty() {
        assert!(CopyColumnsOptions::from_json("{}").unwrap().columns.is_empty());
    }

    #[test]
    fn malformed_json_is_invalid_argument() {
        let err = CopyColumnsOptions::from_json(r#"{"columns":[{"name":"x"}]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn json_round_trip() {
        let opts = CopyColumnsOptions::new().column("name", "label");
        let text = opts.to_json().unwrap();
        assert_eq!(CopyColumnsOptions::from_json(&text).unwrap(), opts);
    }
}
