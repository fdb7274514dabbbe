//! UI event types.
//!
//! All external inputs (terminal, request results) are converted to
//! `UiEvent` before the reducer sees them. Request results arrive through
//! the runtime inbox.

use crossterm::event::Event as CrosstermEvent;
use olympiad_core::actions::Action;
use olympiad_core::api::{ApiError, ApiResponse};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; advances the spinner and triggers a render.
    Tick,

    /// Raw terminal input.
    Terminal(CrosstermEvent),

    /// A request spawned by `UiEffect::SendRequest` finished.
    RequestCompleted {
        action: Action,
        result: Result<ApiResponse, ApiError>,
    },
}
