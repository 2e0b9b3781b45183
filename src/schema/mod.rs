pub mod data_kind;
pub use data_kind::*;

pub mod metadata;
pub use metadata::*;

pub mod column_schema;
pub use column_schema::*;

#[allow(clippy::module_inception)]
pub mod schema;
pub use schema::*;
