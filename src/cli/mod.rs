//! Console front end: menus, input parsing and the acting user

pub mod console;
pub mod handlers;
pub mod menu;
pub mod state;

pub use console::Console;
pub use menu::Session;
pub use state::AppState;
