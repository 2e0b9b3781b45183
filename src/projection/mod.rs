pub mod row;
pub use row::*;

pub mod bound_projection;
pub use bound_projection::*;

pub mod row_session;
pub use row_session::*;
