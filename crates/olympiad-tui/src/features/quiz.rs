//! Practice quiz: one question at a time, then the score.

use olympiad_core::models::CorrectOption;
use olympiad_core::quiz::{Quiz, QuizQuestion};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::common::layout::{KeyHint, hints_line};

pub fn render_quiz(frame: &mut Frame, area: Rect, quiz: &Quiz) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Practice ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match quiz.current() {
        _ if quiz.is_finished() => score_lines(quiz),
        Some(question) => question_lines(quiz, question),
        None => vec![
            Line::from(Span::styled(
                "  No questions found for the selected syllabus item.",
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
            hints_line(&[KeyHint::new("Esc", "back")]),
        ],
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn question_lines(quiz: &Quiz, question: &QuizQuestion) -> Vec<Line<'static>> {
    let number = quiz.position() + 1;
    let percent = (number as f64 / quiz.len() as f64 * 100.0).round() as u32;

    let mut header = vec![Span::styled(
        format!("  Question {number} of {}  {percent}%", quiz.len()),
        Style::default().fg(Color::Gray),
    )];
    if let Some(difficulty) = question.difficulty.as_deref().filter(|d| !d.is_empty()) {
        header.push(Span::styled(
            format!("  [{difficulty}]"),
            difficulty_style(difficulty),
        ));
    }

    let mut lines = vec![
        Line::from(header),
        Line::default(),
        Line::from(Span::styled(
            format!("  {}", question.question_text),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(
        CorrectOption::all()
            .iter()
            .map(|option| option_line(quiz, question, *option)),
    );
    lines.push(Line::default());

    match quiz.last_answer() {
        Some(true) => lines.push(Line::from(Span::styled(
            "  ✓ Correct! Well done!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))),
        Some(false) => {
            lines.push(Line::from(Span::styled(
                "  ✗ Incorrect. The correct answer is shown above.",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            if let Some(solution) = question.solution.as_deref().filter(|s| !s.is_empty()) {
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    Span::styled("  Solution: ", Style::default().fg(Color::Cyan)),
                    Span::raw(solution.to_string()),
                ]));
            }
        }
        None => {}
    }

    let enter = if !quiz.is_revealed() {
        "submit"
    } else if quiz.is_last() {
        "finish"
    } else {
        "next"
    };
    lines.push(Line::default());
    lines.push(hints_line(&[
        KeyHint::new("A-D", "pick"),
        KeyHint::new("↑↓", "move"),
        KeyHint::new("Enter", enter),
        KeyHint::new("Esc", "back"),
    ]));
    lines
}

fn option_line(quiz: &Quiz, question: &QuizQuestion, option: CorrectOption) -> Line<'static> {
    let picked = quiz.selected() == Some(option);
    let text = format!("{}. {}", option.as_str(), question.option_text(option));

    if quiz.is_revealed() {
        let correct = question.correct() == Some(option);
        let (style, mark) = if correct {
            (Style::default().fg(Color::Green), "  ✓ Correct")
        } else if picked {
            (Style::default().fg(Color::Red), "  ✗ Your Answer")
        } else {
            (Style::default().fg(Color::Gray), "")
        };
        return Line::from(vec![
            Span::styled(format!("    {text}"), style),
            Span::styled(mark, style.add_modifier(Modifier::BOLD)),
        ]);
    }

    if picked {
        Line::from(vec![
            Span::styled("  › ", Style::default().fg(Color::Cyan)),
            Span::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled(
            format!("    {text}"),
            Style::default().fg(Color::White),
        ))
    }
}

fn difficulty_style(difficulty: &str) -> Style {
    let color = if difficulty.eq_ignore_ascii_case("easy") {
        Color::Green
    } else if difficulty.eq_ignore_ascii_case("medium") {
        Color::Yellow
    } else {
        Color::Red
    };
    Style::default().fg(color)
}

fn score_lines(quiz: &Quiz) -> Vec<Line<'static>> {
    let score = quiz.score();
    let color = match score.percent {
        80.. => Color::Green,
        60..=79 => Color::Blue,
        _ => Color::Yellow,
    };
    vec![
        Line::from(Span::styled(
            "  Exam Completed!",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("  Score      ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}%", score.percent),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Correct    ", Style::default().fg(Color::Gray)),
            Span::styled(score.correct.to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("  Incorrect  ", Style::default().fg(Color::Gray)),
            Span::styled(score.incorrect.to_string(), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("  Total      ", Style::default().fg(Color::Gray)),
            Span::raw(score.total.to_string()),
        ]),
        Line::default(),
        Line::from(Span::styled(
            format!("  {}", score.verdict()),
            Style::default().fg(color),
        )),
        Line::default(),
        hints_line(&[KeyHint::new("r", "retry"), KeyHint::new("Esc", "back")]),
    ]
}
