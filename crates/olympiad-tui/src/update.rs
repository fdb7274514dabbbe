//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use olympiad_core::actions::{Action, build_request};
use olympiad_core::api::{ApiError, ApiResponse};
use olympiad_core::models::CorrectOption;
use olympiad_core::outcome::Outcome;
use olympiad_core::quiz::Quiz;
use olympiad_core::session::{Screen, View};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::auth::AuthTab;
use crate::features::console::{ConsoleFocus, RESPONSE_PAGE};
use crate::features::form::FormState;
use crate::features::sidebar;
use crate::state::{AppState, Feedback, Focus, RequestState, SidebarItem};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.request.is_busy() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::RequestCompleted { action, result } => {
            handle_request_completed(app, action, &result);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) if !app.request.is_busy() => {
            if let Some(form) = focused_form(app) {
                form.insert_str(&text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
        app.should_quit = true;
        return vec![UiEffect::Quit];
    }
    if app.request.is_busy() {
        return vec![];
    }

    match app.session.current_view() {
        View::Auth => handle_auth_key(app, key),
        View::Screen(_) => match app.focus {
            Focus::Sidebar => handle_sidebar_key(app, key),
            Focus::Content if app.quiz.is_some() => handle_quiz_key(app, key),
            Focus::Content => handle_content_key(app, key),
        },
    }
}

/// The form currently receiving typed text, if any.
fn focused_form(app: &mut AppState) -> Option<&mut FormState> {
    match app.session.current_view() {
        View::Auth => Some(app.auth.form_mut()),
        View::Screen(_) if app.focus == Focus::Content && app.quiz.is_none() => app
            .console
            .as_mut()
            .filter(|c| c.focus == ConsoleFocus::Form)
            .map(|c| &mut c.form),
        View::Screen(_) => None,
    }
}

/// Keys shared by every form: typing, deleting, choice cycling.
fn edit_form(form: &mut FormState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => form.clear_focused(),
        KeyCode::Char(c) if !ctrl => form.insert_char(c),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Left => {
            form.cycle_choice(false);
        }
        KeyCode::Right => {
            form.cycle_choice(true);
        }
        _ => {}
    }
}

fn handle_auth_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('t') if ctrl => app.auth.toggle_tab(),
        KeyCode::Down | KeyCode::Tab => {
            app.auth.form_mut().focus_next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.auth.form_mut().focus_prev();
        }
        KeyCode::Esc => app.auth.feedback = None,
        KeyCode::Enter => return submit_auth(app),
        _ => edit_form(app.auth.form_mut(), key),
    }
    vec![]
}

fn submit_auth(app: &mut AppState) -> Vec<UiEffect> {
    let action = app.auth.tab.action();
    let values = app.auth.form().values();
    match build_request(action, &values) {
        Ok(request) => {
            if action == Action::Login {
                app.auth.sign_in.clear_secrets();
            }
            app.auth.feedback = None;
            start_request(app, action);
            vec![UiEffect::SendRequest { action, request }]
        }
        Err(err) => {
            app.auth.feedback = Some(Feedback::error(err.to_string()));
            vec![]
        }
    }
}

fn handle_sidebar_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.sidebar = sidebar::move_selection(app.sidebar, true);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.sidebar = sidebar::move_selection(app.sidebar, false);
        }
        KeyCode::Enter | KeyCode::Right => match SidebarItem::at(app.sidebar) {
            SidebarItem::Screen(screen) => {
                app.navigate(screen);
                if app.console.is_some() {
                    app.focus = Focus::Content;
                }
            }
            SidebarItem::SignOut => {
                tracing::info!("Signed out");
                app.sign_out();
            }
        },
        KeyCode::Tab if app.console.is_some() => app.focus = Focus::Content,
        _ => {}
    }
    vec![]
}

fn handle_content_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let Some(console) = app.console.as_mut() else {
        app.focus = Focus::Sidebar;
        return vec![];
    };

    match (key.code, console.focus) {
        (KeyCode::Esc, _) => app.focus = Focus::Sidebar,
        (KeyCode::Char('p'), _) if ctrl => {
            app.start_quiz();
        }
        (KeyCode::PageUp, _) => console.scroll_response_up(RESPONSE_PAGE),
        (KeyCode::PageDown, _) => console.scroll_response_down(RESPONSE_PAGE),
        (KeyCode::Home, _) if ctrl => console.scroll_response_to_top(),
        (KeyCode::End, _) if ctrl => console.scroll_response_to_bottom(),
        (KeyCode::Down | KeyCode::Tab, _) => console.focus_down(),
        (KeyCode::Up | KeyCode::BackTab, _) => console.focus_up(),
        (KeyCode::Enter, _) => return submit_console(app),
        (KeyCode::Left, ConsoleFocus::Selector) => console.select_action(false),
        (KeyCode::Right, ConsoleFocus::Selector) => console.select_action(true),
        (_, ConsoleFocus::Form) => edit_form(&mut console.form, key),
        (_, ConsoleFocus::Selector) => {}
    }
    vec![]
}

fn submit_console(app: &mut AppState) -> Vec<UiEffect> {
    let Some(console) = app.console.as_mut() else {
        return vec![];
    };
    let action = console.action();
    match build_request(action, &console.form.values()) {
        Ok(request) => {
            console.set_feedback(None);
            start_request(app, action);
            vec![UiEffect::SendRequest { action, request }]
        }
        Err(err) => {
            console.set_feedback(Some(Feedback::error(err.to_string())));
            vec![]
        }
    }
}

fn start_request(app: &mut AppState, action: Action) {
    app.request = RequestState::InFlight {
        action,
        started: Instant::now(),
    };
    app.spinner_frame = 0;
}

fn handle_request_completed(
    app: &mut AppState,
    action: Action,
    result: &Result<ApiResponse, ApiError>,
) {
    if let RequestState::InFlight { started, .. } = app.request {
        tracing::debug!(%action, elapsed_ms = started.elapsed().as_millis() as u64, "Request finished");
    }
    app.request = RequestState::Idle;
    let outcome = Outcome::from_result(action, result);

    match action {
        Action::Login => match outcome.user {
            Some(user) => {
                tracing::info!("Signed in");
                app.session.login(user);
                app.auth = Default::default();
                app.navigate(Screen::Dashboard);
                app.focus = Focus::Sidebar;
                app.notice = outcome.message;
            }
            None => app.auth.feedback = Some(outcome.into()),
        },
        Action::Signup => {
            if outcome.is_success() {
                let email = app
                    .auth
                    .sign_up
                    .values()
                    .get("email")
                    .cloned()
                    .unwrap_or_default();
                app.auth.sign_up = FormState::new(Action::Signup);
                if app.auth.tab == AuthTab::SignUp {
                    app.auth.toggle_tab();
                }
                app.auth.sign_in.set_value("email", email.trim());
            }
            app.auth.feedback = Some(outcome.into());
        }
        _ => {
            if let Some(console) = app.console.as_mut() {
                if action == Action::QuestionsByTopic {
                    console.quiz = outcome
                        .payload
                        .as_ref()
                        .filter(|_| outcome.is_success())
                        .map(|payload| Quiz::from_payload(payload, None))
                        .filter(|quiz| !quiz.is_empty());
                }
                console.set_feedback(Some(outcome.into()));
            }
        }
    }
}

fn handle_quiz_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(quiz) = app.quiz.as_mut() else {
        return vec![];
    };

    match key.code {
        KeyCode::Esc => app.quiz = None,
        KeyCode::Char('r' | 'R') if quiz.is_finished() => quiz.retry(),
        KeyCode::Char(c) => {
            if let Some(option) = answer_key(c) {
                quiz.select(option);
            }
        }
        KeyCode::Down | KeyCode::Right | KeyCode::Tab => quiz.cycle(true),
        KeyCode::Up | KeyCode::Left | KeyCode::BackTab => quiz.cycle(false),
        KeyCode::Enter if quiz.is_revealed() => quiz.advance(),
        KeyCode::Enter => {
            if let Some(correct) = quiz.submit() {
                tracing::debug!(correct, question = quiz.position() + 1, "Answer submitted");
            }
        }
        _ => {}
    }
    vec![]
}

/// Maps `a`-`d` and `1`-`4` to an answer letter.
fn answer_key(c: char) -> Option<CorrectOption> {
    let letter = match c {
        '1'..='4' => char::from(b'A' + (c as u8 - b'1')),
        _ => c,
    };
    CorrectOption::parse(&letter.to_string())
}
