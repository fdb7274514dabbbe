//! Turns an API result into what the user sees.

use serde_json::Value;

use crate::actions::Action;
use crate::api::{ApiError, ApiResponse};
use crate::models::UserRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Failure,
}

/// Feedback for one submitted action.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    /// Headline text. Successful reads have none; the payload speaks.
    pub message: Option<String>,
    /// Response body, only on success and only when non-null.
    pub payload: Option<Value>,
    /// Status code when the server answered.
    pub status: Option<u16>,
    /// The user to sign in, set only for a successful login.
    pub user: Option<UserRecord>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }

    fn success(message: Option<String>, response: &ApiResponse) -> Self {
        Self {
            kind: OutcomeKind::Success,
            message,
            payload: (!response.json.is_null()).then(|| response.json.clone()),
            status: Some(response.status),
            user: None,
        }
    }

    fn failure(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            kind: OutcomeKind::Failure,
            message: Some(message.into()),
            payload: None,
            status,
            user: None,
        }
    }

    /// Maps the result of `action` to user-facing feedback.
    pub fn from_result(action: Action, result: &Result<ApiResponse, ApiError>) -> Self {
        match action {
            Action::Login => login_outcome(result),
            Action::Signup => signup_outcome(result),
            _ => crud_outcome(action, result),
        }
    }
}

fn login_outcome(result: &Result<ApiResponse, ApiError>) -> Outcome {
    const GENERIC: &str = "Failed to sign in. Please try again.";

    let Ok(response) = result else {
        return Outcome::failure(GENERIC, None);
    };
    match response.status {
        200 => match UserRecord::from_json(&response.json) {
            Some(user) => {
                let message = format!("Welcome back, {}!", user.display_first_name());
                let mut outcome = Outcome::success(Some(message), response);
                outcome.user = Some(user);
                outcome
            }
            None => {
                tracing::warn!("login answered 200 without a user object");
                Outcome::failure(GENERIC, Some(200))
            }
        },
        401 => Outcome::failure("Invalid email or password", Some(401)),
        403 => Outcome::failure("Your account is deactivated", Some(403)),
        status => Outcome::failure(GENERIC, Some(status)),
    }
}

fn signup_outcome(result: &Result<ApiResponse, ApiError>) -> Outcome {
    const GENERIC: &str = "Failed to create account. Please try again.";

    let Ok(response) = result else {
        return Outcome::failure(GENERIC, None);
    };
    match response.status {
        201 => Outcome::success(
            Action::Signup.success_message().map(str::to_string),
            response,
        ),
        400 => Outcome::failure("Email already registered or invalid data", Some(400)),
        status => Outcome::failure(GENERIC, Some(status)),
    }
}

fn crud_outcome(action: Action, result: &Result<ApiResponse, ApiError>) -> Outcome {
    match result {
        Ok(response) if response.status == action.expected_status() => {
            Outcome::success(action.success_message().map(str::to_string), response)
        }
        Ok(response) => Outcome::failure(
            format!("Error: {}", response.status),
            Some(response.status),
        ),
        Err(ApiError::Transport(_)) => Outcome::failure("Error: could not reach the server", None),
        Err(err) => Outcome::failure(format!("Error: {err}"), None),
    }
}
