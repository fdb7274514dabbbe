//! Editable form backed by an action's field specs.

use olympiad_core::actions::{Action, FieldKind, FieldSpec, FieldValues};

#[derive(Debug, Clone)]
pub struct FieldInput {
    pub spec: &'static FieldSpec,
    pub value: String,
}

impl FieldInput {
    /// Options a choice field cycles through; optional choices start with "".
    fn options(&self) -> Vec<&'static str> {
        let FieldKind::Choice(options) = self.spec.kind else {
            return Vec::new();
        };
        let mut all = Vec::with_capacity(options.len() + 1);
        if !self.spec.required {
            all.push("");
        }
        all.extend_from_slice(options);
        all
    }
}

/// Field buffers plus the focused field.
#[derive(Debug, Clone)]
pub struct FormState {
    action: Action,
    fields: Vec<FieldInput>,
    focus: usize,
}

impl FormState {
    pub fn new(action: Action) -> Self {
        let fields = action
            .fields()
            .iter()
            .map(|spec| FieldInput {
                spec,
                value: spec.default.to_string(),
            })
            .collect();
        Self {
            action,
            fields,
            focus: 0,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn fields(&self) -> &[FieldInput] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_first(&mut self) {
        self.focus = 0;
    }

    pub fn focus_last(&mut self) {
        self.focus = self.fields.len().saturating_sub(1);
    }

    /// Moves focus down. Returns false when already on the last field.
    pub fn focus_next(&mut self) -> bool {
        if self.focus + 1 < self.fields.len() {
            self.focus += 1;
            true
        } else {
            false
        }
    }

    /// Moves focus up. Returns false when already on the first field.
    pub fn focus_prev(&mut self) -> bool {
        if self.focus > 0 {
            self.focus -= 1;
            true
        } else {
            false
        }
    }

    pub fn focused(&self) -> Option<&FieldInput> {
        self.fields.get(self.focus)
    }

    fn focused_mut(&mut self) -> Option<&mut FieldInput> {
        self.fields.get_mut(self.focus)
    }

    /// Types a character into the focused field.
    ///
    /// Number fields only take digits; choice fields ignore typing.
    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.focused_mut() else {
            return;
        };
        match field.spec.kind {
            FieldKind::Choice(_) => {}
            FieldKind::Number { .. } if !c.is_ascii_digit() => {}
            _ if c.is_control() => {}
            _ => field.value.push(c),
        }
    }

    /// Inserts pasted text, dropping newlines for single-line fields.
    pub fn insert_str(&mut self, text: &str) {
        let multiline = matches!(
            self.focused().map(|f| f.spec.kind),
            Some(FieldKind::LongText)
        );
        for c in text.chars() {
            if c == '\n' && multiline {
                if let Some(field) = self.focused_mut() {
                    field.value.push('\n');
                }
            } else if c != '\r' && c != '\n' {
                self.insert_char(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_mut()
            && !matches!(field.spec.kind, FieldKind::Choice(_))
        {
            field.value.pop();
        }
    }

    pub fn clear_focused(&mut self) {
        if let Some(field) = self.focused_mut()
            && !matches!(field.spec.kind, FieldKind::Choice(_))
        {
            field.value.clear();
        }
    }

    /// Steps a choice field to its next or previous option.
    /// Returns false if the focused field is not a choice.
    pub fn cycle_choice(&mut self, forward: bool) -> bool {
        let Some(field) = self.focused_mut() else {
            return false;
        };
        let options = field.options();
        if options.is_empty() {
            return false;
        }
        let current = options
            .iter()
            .position(|o| o.eq_ignore_ascii_case(&field.value))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        field.value = options[next].to_string();
        true
    }

    pub fn values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|f| (f.spec.key.to_string(), f.value.clone()))
            .collect()
    }

    pub fn set_value(&mut self, key: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.spec.key == key) {
            field.value = value.to_string();
        }
    }

    /// Blanks password fields, e.g. after a sign-in attempt.
    pub fn clear_secrets(&mut self) {
        for field in &mut self.fields {
            if field.spec.is_secret() {
                field.value.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus_key(form: &mut FormState, key: &str) {
        form.focus_first();
        while form.focused().map(|f| f.spec.key) != Some(key) {
            assert!(form.focus_next(), "field {key} not found");
        }
    }

    #[test]
    fn test_new_form_uses_defaults() {
        let form = FormState::new(Action::CreateSection);
        let values = form.values();
        assert_eq!(values["exam_id"], "1");
        assert_eq!(values["section"], "");
        assert_eq!(values["total_marks"], "1");
    }

    #[test]
    fn test_number_fields_accept_digits_only() {
        let mut form = FormState::new(Action::GetExam);
        form.clear_focused();
        for c in "1a2-".chars() {
            form.insert_char(c);
        }
        assert_eq!(form.values()["exam_id"], "12");
    }

    #[test]
    fn test_choice_cycles_and_ignores_typing() {
        let mut form = FormState::new(Action::AddQuestion);
        focus_key(&mut form, "difficulty");

        form.insert_char('x');
        form.backspace();
        assert_eq!(form.values()["difficulty"], "easy");

        assert!(form.cycle_choice(true));
        assert_eq!(form.values()["difficulty"], "medium");
        assert!(form.cycle_choice(false));
        assert!(form.cycle_choice(false));
        assert_eq!(form.values()["difficulty"], "hard");
    }

    #[test]
    fn test_optional_choice_includes_blank() {
        let mut form = FormState::new(Action::ListQuestions);
        focus_key(&mut form, "difficulty");
        assert_eq!(form.values()["difficulty"], "");

        form.cycle_choice(false);
        assert_eq!(form.values()["difficulty"], "hard");
        form.cycle_choice(true);
        assert_eq!(form.values()["difficulty"], "");
    }

    #[test]
    fn test_cycle_choice_on_text_field_is_noop() {
        let mut form = FormState::new(Action::CreateNote);
        focus_key(&mut form, "note");
        assert!(!form.cycle_choice(true));
    }

    #[test]
    fn test_paste_keeps_newlines_only_in_long_text() {
        let mut form = FormState::new(Action::CreateNote);
        focus_key(&mut form, "note");
        form.insert_str("line one\r\nline two");
        assert_eq!(form.values()["note"], "line one\nline two");

        let mut form = FormState::new(Action::Login);
        form.insert_str("a@b.c\n");
        assert_eq!(form.values()["email"], "a@b.c");
    }

    #[test]
    fn test_focus_stops_at_edges() {
        let mut form = FormState::new(Action::Login);
        assert!(!form.focus_prev());
        assert!(form.focus_next());
        assert!(!form.focus_next());
        form.focus_first();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_clear_secrets_only_touches_passwords() {
        let mut form = FormState::new(Action::Login);
        form.set_value("email", "a@b.c");
        form.set_value("password", "secret1");
        form.clear_secrets();
        assert_eq!(form.values()["email"], "a@b.c");
        assert_eq!(form.values()["password"], "");
    }
}
