use olympiad_core::actions::{Action, actions_for_screen};
use olympiad_core::quiz::Quiz;
use olympiad_core::session::Screen;

use crate::features::form::{FormState, feedback_lines};
use crate::state::Feedback;

/// Which part of the action console has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFocus {
    /// The action selector row.
    Selector,
    /// A field of the current form.
    Form,
}

/// Lines moved by one PageUp/PageDown in the response pane.
pub const RESPONSE_PAGE: u16 = 10;

/// Action selector, form and latest feedback of one action screen.
#[derive(Debug, Clone)]
pub struct ConsoleState {
    actions: Vec<Action>,
    selected: usize,
    pub form: FormState,
    pub focus: ConsoleFocus,
    pub feedback: Option<Feedback>,
    /// First visible line of the response pane.
    response_scroll: u16,
    /// Active questions of the last successful by-topic fetch.
    pub quiz: Option<Quiz>,
}

impl ConsoleState {
    /// Returns `None` for screens without actions.
    pub fn for_screen(screen: Screen) -> Option<Self> {
        let actions = actions_for_screen(screen);
        let first = *actions.first()?;
        Some(Self {
            actions,
            selected: 0,
            form: FormState::new(first),
            focus: ConsoleFocus::Selector,
            feedback: None,
            response_scroll: 0,
            quiz: None,
        })
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn action(&self) -> Action {
        self.form.action()
    }

    /// Switches to the next or previous action with a fresh form.
    pub fn select_action(&mut self, forward: bool) {
        let len = self.actions.len();
        if len == 0 {
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
        self.form = FormState::new(self.actions[self.selected]);
        self.set_feedback(None);
        self.quiz = None;
    }

    /// Replaces the response and scrolls back to its top.
    pub fn set_feedback(&mut self, feedback: Option<Feedback>) {
        self.feedback = feedback;
        self.response_scroll = 0;
    }

    pub fn response_scroll(&self) -> u16 {
        self.response_scroll
    }

    /// Lines in the response pane before wrapping.
    pub fn response_len(&self) -> usize {
        self.feedback.as_ref().map_or(0, |f| feedback_lines(f).len())
    }

    pub fn scroll_response_up(&mut self, lines: u16) {
        self.response_scroll = self.response_scroll.saturating_sub(lines);
    }

    /// Scrolls down, stopping with the last line at the top of the pane.
    pub fn scroll_response_down(&mut self, lines: u16) {
        let max = self.response_len().saturating_sub(1);
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        self.response_scroll = self.response_scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_response_to_top(&mut self) {
        self.response_scroll = 0;
    }

    pub fn scroll_response_to_bottom(&mut self) {
        self.scroll_response_down(u16::MAX);
    }

    /// Moves focus down: selector, then each field.
    pub fn focus_down(&mut self) {
        match self.focus {
            ConsoleFocus::Selector if !self.form.is_empty() => {
                self.focus = ConsoleFocus::Form;
                self.form.focus_first();
            }
            ConsoleFocus::Selector => {}
            ConsoleFocus::Form => {
                self.form.focus_next();
            }
        }
    }

    pub fn focus_up(&mut self) {
        if self.focus == ConsoleFocus::Form && !self.form.focus_prev() {
            self.focus = ConsoleFocus::Selector;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_screens_have_no_console() {
        for screen in [
            Screen::Home,
            Screen::Dashboard,
            Screen::Bookmarks,
            Screen::Profile,
            Screen::Settings,
        ] {
            assert!(ConsoleState::for_screen(screen).is_none(), "{screen:?}");
        }
    }

    #[test]
    fn test_select_action_wraps_and_resets_form() {
        let mut console = ConsoleState::for_screen(Screen::Analytics).unwrap();
        assert_eq!(console.action(), Action::ExamOverview);

        console.form.set_value("exam_id", "9");
        console.select_action(true);
        assert_eq!(console.action(), Action::ExamAnalytics);
        assert_eq!(console.form.values()["exam_id"], "1");

        console.select_action(true);
        assert_eq!(console.action(), Action::ExamOverview);
        console.select_action(false);
        assert_eq!(console.action(), Action::ExamAnalytics);
    }

    #[test]
    fn test_focus_moves_between_selector_and_fields() {
        let mut console = ConsoleState::for_screen(Screen::StudyNotes).unwrap();
        assert_eq!(console.action(), Action::ListNotes);

        console.focus_down();
        assert_eq!(console.focus, ConsoleFocus::Form);
        console.focus_down();
        assert_eq!(console.form.focus(), 0);

        console.focus_up();
        assert_eq!(console.focus, ConsoleFocus::Selector);
    }

    fn long_feedback(items: usize) -> Feedback {
        let payload: Vec<_> = (0..items).map(|i| serde_json::json!(i)).collect();
        Feedback {
            kind: crate::state::FeedbackKind::Success,
            message: None,
            payload: Some(serde_json::Value::from(payload)),
        }
    }

    #[test]
    fn test_response_scroll_clamps_and_resets() {
        let mut console = ConsoleState::for_screen(Screen::MyExams).unwrap();
        console.set_feedback(Some(long_feedback(30)));
        // "[", thirty items, "]"
        assert_eq!(console.response_len(), 32);

        console.scroll_response_down(RESPONSE_PAGE);
        assert_eq!(console.response_scroll(), 10);
        console.scroll_response_to_bottom();
        assert_eq!(console.response_scroll(), 31);
        console.scroll_response_up(RESPONSE_PAGE);
        assert_eq!(console.response_scroll(), 21);

        console.set_feedback(Some(long_feedback(5)));
        assert_eq!(console.response_scroll(), 0);

        console.scroll_response_down(RESPONSE_PAGE);
        console.select_action(true);
        assert_eq!(console.response_scroll(), 0);
        assert!(console.feedback.is_none());
    }

    #[test]
    fn test_scroll_without_response_stays_at_top() {
        let mut console = ConsoleState::for_screen(Screen::MyExams).unwrap();
        console.scroll_response_down(RESPONSE_PAGE);
        assert_eq!(console.response_scroll(), 0);
    }

    #[test]
    fn test_focus_stays_on_selector_without_fields() {
        let mut console = ConsoleState::for_screen(Screen::MyExams).unwrap();
        assert_eq!(console.action(), Action::ListExams);
        console.focus_down();
        assert_eq!(console.focus, ConsoleFocus::Selector);
    }
}
