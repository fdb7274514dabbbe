//! Screens without actions: home, dashboard, bookmarks, profile, settings.

use olympiad_core::models::UserRecord;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Placeholder statistics until the backend exposes per-user numbers.
const STAT_CARDS: [(&str, &str); 3] = [
    ("Tests Taken", "0"),
    ("Avg Score", "0%"),
    ("Day Streak", "0"),
];

fn screen_block(title: &str, active: bool) -> Block<'static> {
    let border = if active { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {title} "))
}

fn heading(text: String) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn dim(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Gray),
    ))
}

fn static_screen(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let block = screen_block(title, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_home(frame: &mut Frame, area: Rect) {
    static_screen(
        frame,
        area,
        "Home",
        vec![
            heading("Olympiad Prep".to_string()),
            Line::default(),
            dim("Prepare for olympiad exams: browse exams, sections and syllabus,"),
            dim("practice questions by topic and keep study notes."),
            Line::default(),
            dim("Pick a screen in the sidebar to get started."),
        ],
    );
}

pub fn render_bookmarks(frame: &mut Frame, area: Rect) {
    static_screen(
        frame,
        area,
        "Bookmarks",
        vec![
            heading("Bookmarks".to_string()),
            Line::default(),
            dim("No bookmarks yet."),
        ],
    );
}

pub fn render_settings(frame: &mut Frame, area: Rect, base_url: &str) {
    static_screen(
        frame,
        area,
        "Settings",
        vec![
            heading("Settings".to_string()),
            Line::default(),
            Line::from(vec![
                Span::styled("Server  ", Style::default().fg(Color::Gray)),
                Span::raw(base_url.to_string()),
            ]),
            Line::default(),
            dim("Edit the config file (`olympiad config path`) or set"),
            dim("OLYMPIAD_BASE_URL to point at another server."),
        ],
    );
}

pub fn render_dashboard(frame: &mut Frame, area: Rect, user: Option<&UserRecord>) {
    let block = screen_block("Dashboard", false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [welcome_area, cards_area, _] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(inner);

    let name = user.map_or_else(|| "User".to_string(), UserRecord::display_first_name);
    let mut welcome = vec![heading(format!("Welcome back, {name}!"))];
    if let Some(user) = user {
        let school = user.text("school_name").unwrap_or_else(|| "N/A".to_string());
        welcome.push(dim(&format!(
            "Grade {} · {school}",
            user.display_grade()
        )));
    }
    frame.render_widget(Paragraph::new(welcome), welcome_area);

    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(cards_area);
    for ((label, value), column) in STAT_CARDS.iter().zip(columns.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                (*value).to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            dim(label),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(card, *column);
    }
}

/// Read-only view of the signed-in user.
pub fn render_profile(frame: &mut Frame, area: Rect, user: Option<&UserRecord>) {
    let mut lines = vec![heading("Profile".to_string()), Line::default()];
    match user {
        Some(user) => {
            let rows = [
                ("First name", user.text("first_name")),
                ("Last name", user.text("last_name")),
                ("Email", user.text("email")),
                ("Phone", user.text("phone_number")),
                ("Grade", Some(user.display_grade())),
                ("School", user.text("school_name")),
                ("City", user.text("city")),
            ];
            lines.extend(profile_rows(&rows));
        }
        None => lines.push(dim("Not signed in.")),
    }
    static_screen(frame, area, "Profile", lines);
}

fn profile_rows(rows: &[(&str, Option<String>)]) -> Vec<Line<'static>> {
    rows.iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<12}"), Style::default().fg(Color::Gray)),
                Span::raw(value.clone().unwrap_or_else(|| "N/A".to_string())),
            ])
        })
        .collect()
}
