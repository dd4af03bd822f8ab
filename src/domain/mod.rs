pub mod booking;
pub mod date_range;
pub mod store;
pub mod validator;

pub use booking::*;
pub use date_range::*;
pub use store::*;
pub use validator::*;
