pub mod hooks;
pub mod logger;
pub mod plugins;

pub use hooks::*;
pub use logger::*;
pub use plugins::*;
