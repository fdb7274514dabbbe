//! Application state composition.
//!
//! ```text
//! AppState
//! ├── session: SessionState   (signed-in user, active screen)
//! ├── auth: AuthState         (sign-in / sign-up forms, shown while signed out)
//! ├── sidebar: usize          (highlighted sidebar item)
//! ├── console: Option<ConsoleState> (action screen: selector, form, feedback)
//! ├── quiz: Option<Quiz>      (practice quiz shown over the Practice console)
//! ├── focus: Focus            (sidebar or content)
//! └── request: RequestState   (at most one request in flight)
//! ```

use std::time::Instant;

use olympiad_core::actions::Action;
use olympiad_core::outcome::{Outcome, OutcomeKind};
use olympiad_core::quiz::Quiz;
use olympiad_core::session::{Screen, SessionState};
use serde_json::Value;

use crate::features::auth::AuthState;
use crate::features::console::ConsoleState;

/// Entries of the sidebar, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarItem {
    Screen(Screen),
    SignOut,
}

impl SidebarItem {
    pub const COUNT: usize = Screen::ALL.len() + 1;

    pub fn at(index: usize) -> Self {
        Screen::from_index(index).map_or(SidebarItem::SignOut, SidebarItem::Screen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// Request lifecycle. Submitting and navigating are blocked while in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    InFlight { action: Action, started: Instant },
}

impl RequestState {
    pub fn is_busy(&self) -> bool {
        matches!(self, RequestState::InFlight { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Message and raw JSON shown under a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: Option<String>,
    pub payload: Option<Value>,
}

impl Feedback {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: Some(message.into()),
            payload: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

impl From<Outcome> for Feedback {
    fn from(outcome: Outcome) -> Self {
        Self {
            kind: match outcome.kind {
                OutcomeKind::Success => FeedbackKind::Success,
                OutcomeKind::Failure => FeedbackKind::Error,
            },
            message: outcome.message,
            payload: outcome.payload,
        }
    }
}

pub struct AppState {
    pub session: SessionState,
    pub auth: AuthState,
    pub sidebar: usize,
    pub console: Option<ConsoleState>,
    /// Running practice quiz. Takes over the content pane while set.
    pub quiz: Option<Quiz>,
    pub focus: Focus,
    pub request: RequestState,
    /// One-line message in the status bar, e.g. the login greeting.
    pub notice: Option<String>,
    /// Backend the client talks to, shown in the footer.
    pub base_url: String,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(base_url: impl Into<String>) -> Self {
        let session = SessionState::new();
        let active = session.active_nav();
        Self {
            session,
            auth: AuthState::default(),
            sidebar: active.index(),
            console: ConsoleState::for_screen(active),
            quiz: None,
            focus: Focus::Sidebar,
            request: RequestState::Idle,
            notice: None,
            base_url: base_url.into(),
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Makes `screen` active and rebuilds its console.
    pub fn navigate(&mut self, screen: Screen) {
        self.session.set_active_nav(screen);
        self.sidebar = screen.index();
        self.console = ConsoleState::for_screen(screen);
        self.quiz = None;
        self.notice = None;
    }

    /// Starts the quiz loaded on the current console from its first question.
    pub fn start_quiz(&mut self) -> bool {
        let Some(mut quiz) = self.console.as_ref().and_then(|c| c.quiz.clone()) else {
            return false;
        };
        quiz.retry();
        self.quiz = Some(quiz);
        self.focus = Focus::Content;
        true
    }

    /// Clears everything tied to the signed-in user.
    pub fn sign_out(&mut self) {
        self.session.logout();
        self.auth = AuthState::default();
        let active = self.session.active_nav();
        self.sidebar = active.index();
        self.console = ConsoleState::for_screen(active);
        self.quiz = None;
        self.focus = Focus::Sidebar;
        self.notice = None;
    }
}
