pub mod add_view;
pub mod date_picker;
pub mod home_view;
pub mod terminal;
pub mod theme;

pub use add_view::*;
pub use date_picker::*;
pub use home_view::*;
pub use terminal::*;
pub use theme::*;
