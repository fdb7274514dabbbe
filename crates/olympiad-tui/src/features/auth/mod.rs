//! Sign-in and sign-up screen.

mod render;
mod state;

pub use render::render_auth;
pub use state::{AuthState, AuthTab};
