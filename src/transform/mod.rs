pub mod copy_columns_options;
pub use copy_columns_options::*;

pub mod row_transform;
pub use row_transform::*;

pub mod copy_columns;
pub use copy_columns::*;

pub mod loader_registry;
pub use loader_registry::*;
