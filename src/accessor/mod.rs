pub mod row_cursor;
pub use row_cursor::*;

#[allow(clippy::module_inception)]
pub mod accessor;
pub use accessor::*;

pub mod accessor_registry;
pub use accessor_registry::*;
