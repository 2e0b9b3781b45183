use serde_json::{Map, Value};

/// One materialized row, keyed by output column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row(pub Map<String, Value>);

impl Row {
    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn into_value(self) -> Value { Value::Object(self.0) }
}
