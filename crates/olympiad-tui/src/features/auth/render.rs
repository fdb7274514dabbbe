use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::{AuthState, AuthTab};
use crate::common::layout::{KeyHint, centered_rect, hints_line};
use crate::features::form::{feedback_lines, form_lines, submit_line};

const BOX_WIDTH: u16 = 76;

/// Draws the centered auth box with tab header, active form and feedback.
pub fn render_auth(frame: &mut Frame, area: Rect, auth: &AuthState, busy: bool) {
    let form = auth.form();
    let feedback_len = auth.feedback.as_ref().map_or(0, |f| {
        // message plus a few lines of payload
        feedback_lines(f).len().min(6) + 1
    });
    let height = (form.fields().len() + feedback_len + 9) as u16;
    let popup = centered_rect(area, BOX_WIDTH, height);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Olympiad Prep ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = vec![tabs_line(auth.tab), Line::default()];
    lines.extend(form_lines(form, true, inner.width));
    lines.push(Line::default());
    lines.push(submit_line(auth.tab.action().submit_label(), true, busy));
    if let Some(feedback) = &auth.feedback {
        lines.push(Line::default());
        lines.extend(feedback_lines(feedback));
    }
    lines.push(Line::default());
    lines.push(hints_line(&[
        KeyHint::new("Ctrl+T", "switch tab"),
        KeyHint::new("↑↓", "field"),
        KeyHint::new("Enter", "submit"),
        KeyHint::new("Ctrl+Q", "quit"),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn tabs_line(active: AuthTab) -> Line<'static> {
    let tab = |tab: AuthTab| {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!(" {} ", tab.label()), style)
    };
    Line::from(vec![
        Span::raw("  "),
        tab(AuthTab::SignIn),
        Span::raw(" "),
        tab(AuthTab::SignUp),
    ])
}
