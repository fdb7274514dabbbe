//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O itself.

use olympiad_core::actions::Action;
use olympiad_core::api::ApiRequest;

#[derive(Debug, PartialEq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Issue one HTTP request and report back with `UiEvent::RequestCompleted`.
    SendRequest {
        action: Action,
        request: ApiRequest,
    },
}
