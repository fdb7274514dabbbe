use olympiad_core::actions::FieldKind;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::FormState;
use crate::common::text::{mask, tail_to_width, truncate_with_ellipsis};
use crate::state::{Feedback, FeedbackKind};

const LABEL_WIDTH: usize = 28;
const CURSOR: &str = "▏";

/// Renders one line per field. `active` is false when focus is elsewhere.
pub fn form_lines(form: &FormState, active: bool, width: u16) -> Vec<Line<'static>> {
    let value_width = (width as usize).saturating_sub(LABEL_WIDTH + 4).max(4);

    form.fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = active && i == form.focus();
            let marker = if focused { "› " } else { "  " };
            let required = if field.spec.required { "*" } else { " " };
            let label = truncate_with_ellipsis(field.spec.label, LABEL_WIDTH - 1);

            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{label:<width$}", width = LABEL_WIDTH - 1), label_style),
                Span::styled(required, Style::default().fg(Color::Red)),
                Span::raw(" "),
            ];
            spans.extend(value_spans(field.spec.kind, &field.value, focused, value_width));
            Line::from(spans)
        })
        .collect()
}

fn value_spans(kind: FieldKind, value: &str, focused: bool, width: usize) -> Vec<Span<'static>> {
    let value_style = Style::default().fg(Color::White);

    if let FieldKind::Choice(_) = kind {
        let shown = if value.is_empty() { "(any)" } else { value };
        let arrows = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        return vec![
            Span::styled("‹ ", arrows),
            Span::styled(shown.to_string(), value_style),
            Span::styled(" ›", arrows),
        ];
    }

    let display = match kind {
        FieldKind::Password { .. } => mask(value),
        FieldKind::LongText => value.replace('\n', " ⏎ "),
        _ => value.to_string(),
    };
    let display = tail_to_width(&display, width.saturating_sub(1));

    let mut spans = vec![Span::styled(display, value_style)];
    if focused {
        spans.push(Span::styled(
            CURSOR,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    spans
}

/// The submit button line.
pub fn submit_line(label: &str, focused: bool, busy: bool) -> Line<'static> {
    let style = if busy {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("[ {label} ]"), style),
        Span::styled("  Enter", Style::default().fg(Color::DarkGray)),
    ])
}

/// Status message followed by the pretty-printed response body.
pub fn feedback_lines(feedback: &Feedback) -> Vec<Line<'static>> {
    let color = match feedback.kind {
        FeedbackKind::Success => Color::Green,
        FeedbackKind::Error => Color::Red,
    };
    let mut lines = Vec::new();
    if let Some(message) = &feedback.message {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(payload) = &feedback.payload {
        let pretty = serde_json::to_string_pretty(payload).unwrap_or_else(|_err| payload.to_string());
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(pretty.lines().map(|l| {
            Line::from(Span::styled(
                format!("  {l}"),
                Style::default().fg(Color::Gray),
            ))
        }));
    }
    lines
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_password_is_masked() {
        let mut form = FormState::new(olympiad_core::actions::Action::Login);
        form.set_value("password", "secret1");
        let lines = form_lines(&form, true, 80);
        let rendered: Vec<String> = lines.iter().map(text).collect();
        assert!(rendered.iter().all(|l| !l.contains("secret1")));
        assert!(rendered.iter().any(|l| l.contains("•••••••")));
    }

    #[test]
    fn test_feedback_pretty_prints_payload() {
        let feedback = Feedback {
            kind: FeedbackKind::Success,
            message: Some("Exam created!".to_string()),
            payload: Some(json!({"id": 3})),
        };
        let rendered: Vec<String> = feedback_lines(&feedback).iter().map(text).collect();
        assert_eq!(rendered[0], "  Exam created!");
        assert!(rendered.contains(&"    \"id\": 3".to_string()));
    }
}
