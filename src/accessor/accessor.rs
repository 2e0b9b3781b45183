use std::fmt;

use serde_json::{Number, Value};

use crate::schema::DataKind;

/// Zero-argument reader of one column of the cursor's current row.
pub type Getter<'a, T> = Box<dyn Fn() -> T + 'a>;

/// Typed accessor for one column, tagged by the representation it serves.
///
/// Callers match once when the accessor is built and keep the inner getter;
/// calling it performs no further type tests.
pub enum Accessor<'a> {
    Bool(Getter<'a, bool>),
    Int8(Getter<'a, i8>),
    Int16(Getter<'a, i16>),
    Int32(Getter<'a, i32>),
    Int64(Getter<'a, i64>),
    UInt8(Getter<'a, u8>),
    UInt16(Getter<'a, u16>),
    UInt32(Getter<'a, u32>),
    UInt64(Getter<'a, u64>),
    Float32(Getter<'a, f32>),
    Float64(Getter<'a, f64>),
    Text(Getter<'a, String>),
    /// Microseconds since the unix epoch
    Timestamp(Getter<'a, i64>),
    VectorBool(Getter<'a, Vec<bool>>),
    VectorInt8(Getter<'a, Vec<i8>>),
    VectorInt16(Getter<'a, Vec<i16>>),
    VectorInt32(Getter<'a, Vec<i32>>),
    VectorInt64(Getter<'a, Vec<i64>>),
    VectorUInt8(Getter<'a, Vec<u8>>),
    VectorUInt16(Getter<'a, Vec<u16>>),
    VectorUInt32(Getter<'a, Vec<u32>>),
    VectorUInt64(Getter<'a, Vec<u64>>),
    VectorFloat32(Getter<'a, Vec<f32>>),
    VectorFloat64(Getter<'a, Vec<f64>>),
    VectorText(Getter<'a, Vec<String>>),
    VectorTimestamp(Getter<'a, Vec<i64>>),
}

impl<'a> Accessor<'a> {
    pub fn data_kind(&self) -> DataKind {
        match self {
            Accessor::Bool(_) => DataKind::Bool,
            Accessor::Int8(_) => DataKind::Int8,
            Accessor::Int16(_) => DataKind::Int16,
            Accessor::Int32(_) => DataKind::Int32,
            Accessor::Int64(_) => DataKind::Int64,
            Accessor::UInt8(_) => DataKind::UInt8,
            Accessor::UInt16(_) => DataKind::UInt16,
            Accessor::UInt32(_) => DataKind::UInt32,
            Accessor::UInt64(_) => DataKind::UInt64,
            Accessor::Float32(_) => DataKind::Float32,
            Accessor::Float64(_) => DataKind::Float64,
            Accessor::Text(_) => DataKind::Text,
            Accessor::Timestamp(_) => DataKind::Timestamp,
            Accessor::VectorBool(_) => DataKind::vector(DataKind::Bool),
            Accessor::VectorInt8(_) => DataKind::vector(DataKind::Int8),
            Accessor::VectorInt16(_) => DataKind::vector(DataKind::Int16),
            Accessor::VectorInt32(_) => DataKind::vector(DataKind::Int32),
            Accessor::VectorInt64(_) => DataKind::vector(DataKind::Int64),
            Accessor::VectorUInt8(_) => DataKind::vector(DataKind::UInt8),
            Accessor::VectorUInt16(_) => DataKind::vector(DataKind::UInt16),
            Accessor::VectorUInt32(_) => DataKind::vector(DataKind::UInt32),
            Accessor::VectorUInt64(_) => DataKind::vector(DataKind::UInt64),
            Accessor::VectorFloat32(_) => DataKind::vector(DataKind::Float32),
            Accessor::VectorFloat64(_) => DataKind::vector(DataKind::Float64),
            Accessor::VectorText(_) => DataKind::vector(DataKind::Text),
            Accessor::VectorTimestamp(_) => DataKind::vector(DataKind::Timestamp),
        }
    }

    /// The inner getter if this accessor serves `T`.
    pub fn typed<T: AccessorValue>(&self) -> Option<&Getter<'a, T>> {
        T::getter(self)
    }

    /// Current value as JSON.
    ///
    /// Generic path for row materialization; unlike the typed getters it
    /// matches on the variant every call.
    pub fn read_json(&self) -> Value {
        match self {
            Accessor::Bool(g) => Value::Bool(g()),
            Accessor::Int8(g) => Value::from(g()),
            Accessor::Int16(g) => Value::from(g()),
            Accessor::Int32(g) => Value::from(g()),
            Accessor::Int64(g) | Accessor::Timestamp(g) => Value::from(g()),
            Accessor::UInt8(g) => Value::from(g()),
            Accessor::UInt16(g) => Value::from(g()),
            Accessor::UInt32(g) => Value::from(g()),
            Accessor::UInt64(g) => Value::from(g()),
            Accessor::Float32(g) => float_json(g() as f64),
            Accessor::Float64(g) => float_json(g()),
            Accessor::Text(g) => Value::String(g()),
            Accessor::VectorBool(g) => json_array(g()),
            Accessor::VectorInt8(g) => json_array(g()),
            Accessor::VectorInt16(g) => json_array(g()),
            Accessor::VectorInt32(g) => json_array(g()),
            Accessor::VectorInt64(g) | Accessor::VectorTimestamp(g) => json_array(g()),
            Accessor::VectorUInt8(g) => json_array(g()),
            Accessor::VectorUInt16(g) => json_array(g()),
            Accessor::VectorUInt32(g) => json_array(g()),
            Accessor::VectorUInt64(g) => json_array(g()),
            Accessor::VectorFloat32(g) => Value::Array(g().into_iter().map(|f| float_json(f as f64)).collect()),
            Accessor::VectorFloat64(g) => Value::Array(g().into_iter().map(float_json).collect()),
            Accessor::VectorText(g) => json_array(g()),
        }
    }
}

fn json_array<T: Into<Value>>(items: Vec<T>) -> Value {
    Value::Array(items.into_iter().map(Into::into).collect())
}

// NaN and infinities have no JSON form
fn float_json(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

impl fmt::Debug for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accessor({})", self.data_kind())
    }
}

/// Rust types an [`Accessor`] can hand out a typed getter for.
pub trait AccessorValue: Sized {
    fn getter<'s, 'a>(accessor: &'s Accessor<'a>) -> Option<&'s Getter<'a, Self>>;
}

macro_rules! accessor_value {
    ($ty:ty => $($variant:ident)|+) => {
        impl AccessorValue for $ty {
            fn getter<'s, 'a>(accessor: &'s Accessor<'a>) -> Option<&'s Getter<'a, Self>> {
                match accessor {
                    $(Accessor::$variant(g))|+ => Some(g),
                    _ => None,
                }
            }
        }
    };
}

accessor_value!(bool => Bool);
accessor_value!(i8 => Int8);
accessor_value!(i16 => Int16);
accessor_value!(i32 => Int32);
accessor_value!(i64 => Int64 | Timestamp);
accessor_value!(u8 => UInt8);
accessor_value!(u16 => UInt16);
accessor_value!(u32 => UInt32);
accessor_value!(u64 => UInt64);
accessor_value!(f32 => Float32);
accessor_value!(f64 => Float64);
accessor_value!(String => Text);
accessor_value!(Vec<bool> => VectorBool);
accessor_value!(Vec<i8> => VectorInt8);
accessor_value!(Vec<i16> => VectorInt16);
accessor_value!(Vec<i32> => VectorInt32);
accessor_value!(Vec<i64> => VectorInt64 | VectorTimestamp);
accessor_value!(Vec<u8> => VectorUInt8);
accessor_value!(Vec<u16> => VectorUInt16);
accessor_value!(Vec<u32> => VectorUInt32);
accessor_value!(Vec<u64> => VectorUInt64);
accessor_value!(Vec<f32> => VectorFloat32);
accessor_value!(Vec<f64> => VectorFloat64);
accessor_value!(Vec<String> => VectorText);
