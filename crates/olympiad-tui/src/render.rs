//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use olympiad_core::session::{Screen, View};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::common::text::truncate_with_ellipsis;
use crate::features::auth::render_auth;
use crate::features::console::render_console;
use crate::features::quiz::render_quiz;
use crate::features::screens;
use crate::features::sidebar::{SIDEBAR_WIDTH, render_sidebar};
use crate::state::{AppState, Focus, RequestState};

/// Height of the status bar at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for the busy indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let [main, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)]).areas(area);

    match app.session.current_view() {
        View::Auth => render_auth(frame, main, &app.auth, app.request.is_busy()),
        View::Screen(screen) => {
            let [side, content] =
                Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                    .areas(main);
            render_sidebar(frame, side, app);
            render_screen(frame, content, app, screen);
        }
    }

    render_status_line(frame, status, app);
}

fn render_screen(frame: &mut Frame, area: Rect, app: &AppState, screen: Screen) {
    let user = app.session.user_data();
    let active = app.focus == Focus::Content;
    let busy = app.request.is_busy();

    match screen {
        Screen::Home => screens::render_home(frame, area),
        Screen::Dashboard => screens::render_dashboard(frame, area, user),
        Screen::Bookmarks => screens::render_bookmarks(frame, area),
        Screen::Profile => screens::render_profile(frame, area, user),
        Screen::Settings => screens::render_settings(frame, area, &app.base_url),
        Screen::MyExams | Screen::Practice | Screen::Analytics | Screen::StudyNotes => {
            if let Some(quiz) = &app.quiz {
                render_quiz(frame, area, quiz);
            } else if let Some(console) = &app.console {
                render_console(frame, area, screen.label(), console, active, busy);
            }
        }
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = Vec::new();

    if let RequestState::InFlight { action, .. } = app.request {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {spinner} {action}…"),
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(notice) = &app.notice {
        spans.push(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Green),
        ));
    }

    let used: usize = spans.iter().map(|s| s.width()).sum();
    let server = truncate_with_ellipsis(
        &app.base_url,
        (area.width as usize).saturating_sub(used + 2),
    );
    let padding = (area.width as usize).saturating_sub(used + server.width() + 1);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(server, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
