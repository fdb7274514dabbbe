use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::{ConsoleFocus, ConsoleState};
use crate::common::layout::{KeyHint, hints_line};
use crate::features::form::{feedback_lines, form_lines, submit_line};

/// Draws an action screen. `active` is false while the sidebar has focus.
pub fn render_console(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    console: &ConsoleState,
    active: bool,
    busy: bool,
) {
    let border = if active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {title} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selector_active = active && console.focus == ConsoleFocus::Selector;
    let form_active = active && console.focus == ConsoleFocus::Form;

    let mut lines = vec![
        selector_line(console, selector_active),
        Line::default(),
    ];
    if console.form.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No input needed.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(form_lines(&console.form, form_active, inner.width));
    }
    lines.push(Line::default());
    lines.push(submit_line(console.action().submit_label(), active, busy));
    lines.push(Line::default());
    lines.push(hints_line(&hints(console)));

    let [form_area, response_area] = Layout::vertical([
        Constraint::Length(lines.len() as u16 + 1),
        Constraint::Min(0),
    ])
    .areas(inner);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), form_area);

    if let Some(feedback) = &console.feedback {
        let response = feedback_lines(feedback);
        let max = response.len().saturating_sub(response_area.height as usize);
        let offset = console.response_scroll().min(max as u16);
        frame.render_widget(
            Paragraph::new(response)
                .wrap(Wrap { trim: false })
                .scroll((offset, 0)),
            response_area,
        );
    }
}

fn hints(console: &ConsoleState) -> Vec<KeyHint<'static>> {
    let mut hints = vec![
        KeyHint::new("←→", "action"),
        KeyHint::new("↑↓", "field"),
        KeyHint::new("Enter", "submit"),
    ];
    if console.feedback.is_some() {
        hints.push(KeyHint::new("PgUp/PgDn", "response"));
    }
    if console.quiz.is_some() {
        hints.push(KeyHint::new("Ctrl+P", "practice"));
    }
    hints.push(KeyHint::new("Esc", "sidebar"));
    hints
}

fn selector_line(console: &ConsoleState, focused: bool) -> Line<'static> {
    let arrows = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label_style = if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(if focused { "› " } else { "  " }, arrows),
        Span::styled("Action  ", Style::default().fg(Color::Gray)),
        Span::styled("‹ ", arrows),
        Span::styled(console.action().label().to_string(), label_style),
        Span::styled(" ›", arrows),
        Span::styled(
            format!("  {}/{}", console.selected() + 1, console.actions().len()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}
