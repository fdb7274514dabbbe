//! Form feature: field buffers and their rendering.

mod render;
mod state;

pub use render::{feedback_lines, form_lines, submit_line};
pub use state::{FieldInput, FormState};
