use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime token identifying the storage representation of a column's values.
///
/// Two columns with equal kinds can be read through the same accessor code path.
/// `Vector` wraps the kind of its items; `Custom` names a representation owned
/// by another component that this crate knows nothing about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// UTF-8 text
    Text,
    /// Microseconds since the unix epoch, stored as i64
    Timestamp,
    /// Variable-length vector of a scalar kind
    Vector(Box<DataKind>),
    Custom(String),
}

impl DataKind {
    pub fn vector(item: DataKind) -> DataKind {
        DataKind::Vector(Box::new(item))
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Bool => f.write_str("bool"),
            DataKind::Int8 => f.write_str("int8"),
            DataKind::Int16 => f.write_str("int16"),
            DataKind::Int32 => f.write_str("int32"),
            DataKind::Int64 => f.write_str("int64"),
            DataKind::UInt8 => f.write_str("uint8"),
            DataKind::UInt16 => f.write_str("uint16"),
            DataKind::UInt32 => f.write_str("uint32"),
            DataKind::UInt64 => f.write_str("uint64"),
            DataKind::Float32 => f.write_str("float32"),
            DataKind::Float64 => f.write_str("float64"),
            DataKind::Text => f.write_str("text"),
            DataKind::Timestamp => f.write_str("timestamp"),
            DataKind::Vector(item) => write!(f, "vector<{item}>"),
            DataKind::Custom(name) => write!(f, "custom({name})"),
        }
    }
}
