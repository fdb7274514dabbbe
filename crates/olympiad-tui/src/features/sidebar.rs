//! Sidebar: workspace header, grouped screens and sign-out.

use std::ops::Range;

use olympiad_core::session::Screen;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::text::truncate_with_ellipsis;
use crate::state::{AppState, Focus, SidebarItem};

pub const SIDEBAR_WIDTH: u16 = 26;

/// Group headings, each followed by the sidebar indices it covers.
const GROUPS: [(&str, Range<usize>); 3] =
    [("MAIN", 0..4), ("INSIGHTS", 4..7), ("ACCOUNT", 7..SidebarItem::COUNT)];

/// Moves the highlight, wrapping at both ends.
pub fn move_selection(current: usize, forward: bool) -> usize {
    let len = SidebarItem::COUNT;
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Sidebar;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    if let Some(user) = state.session.user_data() {
        let name = format!("{}'s Workspace", user.display_first_name());
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", user.initial()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                truncate_with_ellipsis(&name, width.saturating_sub(4)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     Grade {}", user.display_grade()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let active = state.session.active_nav();
    for (heading, range) in GROUPS {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(" {heading}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )));
        for index in range {
            lines.push(item_line(
                SidebarItem::at(index),
                index == state.sidebar && focused,
                active,
                width,
            ));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn item_line(item: SidebarItem, highlighted: bool, active: Screen, width: usize) -> Line<'static> {
    let (label, is_active) = match item {
        SidebarItem::Screen(screen) => (screen.label(), screen == active),
        SidebarItem::SignOut => ("Sign out", false),
    };
    let marker = if is_active { "● " } else { "  " };
    let text = truncate_with_ellipsis(label, width.saturating_sub(3));

    let style = if highlighted {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if item == SidebarItem::SignOut {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!(" {marker}"), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{text:<width$}", width = width.saturating_sub(3)), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_cover_every_item_once() {
        let covered: Vec<usize> = GROUPS.iter().flat_map(|(_, r)| r.clone()).collect();
        assert_eq!(covered, (0..SidebarItem::COUNT).collect::<Vec<_>>());
        assert_eq!(SidebarItem::at(SidebarItem::COUNT - 1), SidebarItem::SignOut);
    }

    #[test]
    fn test_move_selection_wraps() {
        assert_eq!(move_selection(0, false), SidebarItem::COUNT - 1);
        assert_eq!(move_selection(SidebarItem::COUNT - 1, true), 0);
        assert_eq!(move_selection(3, true), 4);
    }
}
