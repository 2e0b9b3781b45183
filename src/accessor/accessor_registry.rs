use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{
    accessor::{Accessor, ReadValue, RowCursor},
    errors::{CopyError, Result},
    schema::DataKind,
};

/// Builds the accessor for one representation, bound to `(cursor, column)`.
pub type AccessorCtor = for<'a> fn(&'a dyn RowCursor, usize) -> Accessor<'a>;

macro_rules! accessor_ctor {
    ($name:ident, $variant:ident, $ty:ty) => {
        fn $name<'a>(cursor: &'a dyn RowCursor, column: usize) -> Accessor<'a> {
            Accessor::$variant(Box::new(move || ReadValue::<$ty>::read(cursor, column)))
        }
    };
}

accessor_ctor!(bool_accessor, Bool, bool);
accessor_ctor!(i8_accessor, Int8, i8);
accessor_ctor!(i16_accessor, Int16, i16);
accessor_ctor!(i32_accessor, Int32, i32);
accessor_ctor!(i64_accessor, Int64, i64);
accessor_ctor!(u8_accessor, UInt8, u8);
accessor_ctor!(u16_accessor, UInt16, u16);
accessor_ctor!(u32_accessor, UInt32, u32);
accessor_ctor!(u64_accessor, UInt64, u64);
accessor_ctor!(f32_accessor, Float32, f32);
accessor_ctor!(f64_accessor, Float64, f64);
accessor_ctor!(text_accessor, Text, String);
accessor_ctor!(timestamp_accessor, Timestamp, i64);
accessor_ctor!(vec_bool_accessor, VectorBool, Vec<bool>);
accessor_ctor!(vec_i8_accessor, VectorInt8, Vec<i8>);
accessor_ctor!(vec_i16_accessor, VectorInt16, Vec<i16>);
accessor_ctor!(vec_i32_accessor, VectorInt32, Vec<i32>);
accessor_ctor!(vec_i64_accessor, VectorInt64, Vec<i64>);
accessor_ctor!(vec_u8_accessor, VectorUInt8, Vec<u8>);
accessor_ctor!(vec_u16_accessor, VectorUInt16, Vec<u16>);
accessor_ctor!(vec_u32_accessor, VectorUInt32, Vec<u32>);
accessor_ctor!(vec_u64_accessor, VectorUInt64, Vec<u64>);
accessor_ctor!(vec_f32_accessor, VectorFloat32, Vec<f32>);
accessor_ctor!(vec_f64_accessor, VectorFloat64, Vec<f64>);
accessor_ctor!(vec_text_accessor, VectorText, Vec<String>);
accessor_ctor!(vec_timestamp_accessor, VectorTimestamp, Vec<i64>);

static GLOBAL: Lazy<AccessorRegistry> = Lazy::new(AccessorRegistry::default_registry);

/// Closed table from [`DataKind`] to the constructor of its accessor.
///
/// Lookup happens once per column when a row session binds it; the accessor
/// it returns reads through one concrete `ReadValue<T>` with no further dispatch.
#[derive(Default)]
pub struct AccessorRegistry {
    by_kind: HashMap<DataKind, AccessorCtor>,
}

impl AccessorRegistry {
    pub fn new() -> Self { Self { by_kind: HashMap::new() } }

    pub fn register(&mut self, kind: DataKind, ctor: AccessorCtor) {
        self.by_kind.insert(kind, ctor);
    }

    pub fn get(&self, kind: &DataKind) -> Option<AccessorCtor> {
        self.by_kind.get(kind).copied()
    }

    pub fn supports(&self, kind: &DataKind) -> bool {
        self.by_kind.contains_key(kind)
    }

    pub fn kinds(&self) -> Vec<DataKind> {
        let mut v: Vec<_> = self.by_kind.keys().cloned().collect();
        v.sort_by_key(|k| k.to_string());
        v
    }

    /// Accessor reading `column` of `cursor` as exactly `kind`.
    ///
    /// `column_name` is only used to report an unsupported kind.
    pub fn make_accessor<'a>(
        &self,
        kind: &DataKind,
        column: usize,
        column_name: &str,
        cursor: &'a dyn RowCursor,
    ) -> Result<Accessor<'a>> {
        let ctor = self.get(kind).ok_or_else(|| CopyError::UnsupportedType {
            kind: kind.clone(),
            column: column_name.to_string(),
        })?;
        Ok(ctor(cursor, column))
    }

    pub fn default_registry() -> Self {
        let mut registry = Self::new();
        registry.register(DataKind::Bool, bool_accessor);
        registry.register(DataKind::Int8, i8_accessor);
        registry.register(DataKind::Int16, i16_accessor);
        registry.register(DataKind::Int32, i32_accessor);
        registry.register(DataKind::Int64, i64_accessor);
        registry.register(DataKind::UInt8, u8_accessor);
        registry.register(DataKind::UInt16, u16_accessor);
        registry.register(DataKind::UInt32, u32_accessor);
        registry.register(DataKind::UInt64, u64_accessor);
        registry.register(DataKind::Float32, f32_accessor);
        registry.register(DataKind::Float64, f64_accessor);
        registry.register(DataKind::Text, text_accessor);
        registry.register(DataKind::Timestamp, timestamp_accessor);
        registry.register(DataKind::vector(DataKind::Bool), vec_bool_accessor);
        registry.register(DataKind::vector(DataKind::Int8), vec_i8_accessor);
        registry.register(DataKind::vector(DataKind::Int16), vec_i16_accessor);
        registry.register(DataKind::vector(DataKind::Int32), vec_i32_accessor);
        registry.register(DataKind::vector(DataKind::Int64), vec_i64_accessor);
        registry.register(DataKind::vector(DataKind::UInt8), vec_u8_accessor);
        registry.register(DataKind::vector(DataKind::UInt16), vec_u16_accessor);
        registry.register(DataKind::vector(DataKind::UInt32), vec_u32_accessor);
        registry.register(DataKind::vector(DataKind::UInt64), vec_u64_accessor);
        registry.register(DataKind::vector(DataKind::Float32), vec_f32_accessor);
        registry.register(DataKind::vector(DataKind::Float64), vec_f64_accessor);
        registry.register(DataKind::vector(DataKind::Text), vec_text_accessor);
        registry.register(DataKind::vector(DataKind::Timestamp), vec_timestamp_accessor);
        registry
    }

    /// Process-wide registry holding the default constructors.
    pub fn global() -> &'static AccessorRegistry {
        &GLOBAL
    }
}
