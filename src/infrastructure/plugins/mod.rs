pub mod snapshot_logger;

pub use snapshot_logger::*;
