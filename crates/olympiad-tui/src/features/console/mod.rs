//! Action console: selector, form and response of an action screen.

mod render;
mod state;

pub use render::render_console;
pub use state::{ConsoleFocus, ConsoleState, RESPONSE_PAGE};
