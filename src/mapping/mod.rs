pub mod column_mapping;
pub use column_mapping::*;

pub mod shape_resolver;
pub use shape_resolver::*;

pub mod version_info;
pub use version_info::*;

pub mod mapping_codec;
pub use mapping_codec::*;
