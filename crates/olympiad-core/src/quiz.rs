//! In-memory practice quiz over the questions of one syllabus entry.
//!
//! A quiz is built from the body of `GET /syllabus/{id}/questions`. Only
//! active questions are kept. Answers are scored locally; nothing is sent
//! back to the backend.

use std::mem;

use serde::Deserialize;
use serde_json::Value;

use crate::models::{CorrectOption, Difficulty};

/// One multiple-choice question as returned by the backend.
///
/// Every field is optional on the wire; a question without `is_active: true`
/// never reaches a quiz.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    pub question_id: Option<u64>,
    pub difficulty: Option<String>,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: Option<String>,
    pub solution: Option<String>,
    pub is_active: bool,
}

impl QuizQuestion {
    pub fn option_text(&self, option: CorrectOption) -> &str {
        match option {
            CorrectOption::A => &self.option_a,
            CorrectOption::B => &self.option_b,
            CorrectOption::C => &self.option_c,
            CorrectOption::D => &self.option_d,
        }
    }

    /// The right answer, read from the first letter of `correct_option`.
    pub fn correct(&self) -> Option<CorrectOption> {
        let letter = self.correct_option.as_deref()?.trim().chars().next()?;
        CorrectOption::parse(&letter.to_string())
    }

    fn matches(&self, difficulty: Option<Difficulty>) -> bool {
        difficulty.is_none_or(|wanted| {
            self.difficulty
                .as_deref()
                .is_some_and(|d| d.eq_ignore_ascii_case(wanted.as_str()))
        })
    }
}

/// Totals shown when the last question is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent of `total`.
    pub percent: u32,
}

impl QuizScore {
    pub fn verdict(&self) -> &'static str {
        match self.percent {
            80.. => "Excellent! You've mastered this topic!",
            60..=79 => "Good work! Keep practicing to improve!",
            _ => "Keep practicing! You're making progress!",
        }
    }
}

/// Progress through a list of questions.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<CorrectOption>,
    /// Set once the current answer is submitted.
    revealed: bool,
    answers: Vec<bool>,
    finished: bool,
}

impl Quiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            current: 0,
            selected: None,
            revealed: false,
            answers: Vec::new(),
            finished: false,
        }
    }

    /// Builds a quiz from a questions response.
    ///
    /// Accepts a bare array, or an object carrying the array under
    /// `questions` or `data`. Inactive questions, and questions of another
    /// difficulty when one is given, are dropped. Entries that are not
    /// objects are skipped.
    pub fn from_payload(payload: &Value, difficulty: Option<Difficulty>) -> Self {
        let items = match payload {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => map
                .get("questions")
                .or_else(|| map.get("data"))
                .and_then(Value::as_array)
                .map_or(&[][..], Vec::as_slice),
            _ => &[],
        };

        let questions = items
            .iter()
            .filter_map(|item| QuizQuestion::deserialize(item).ok())
            .filter(|q| q.is_active && q.matches(difficulty))
            .collect();
        Self::new(questions)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the question on screen.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    pub fn selected(&self) -> Option<CorrectOption> {
        self.selected
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// Whether the submitted answer to the current question was right.
    pub fn last_answer(&self) -> Option<bool> {
        if self.revealed {
            self.answers.get(self.current).copied()
        } else {
            None
        }
    }

    /// Picks an answer. Ignored once the answer is revealed.
    pub fn select(&mut self, option: CorrectOption) {
        if !self.revealed && !self.finished {
            self.selected = Some(option);
        }
    }

    /// Moves the pick to the next or previous letter, wrapping.
    pub fn cycle(&mut self, forward: bool) {
        let all = CorrectOption::all();
        let next = match self.selected {
            None if forward => all[0],
            None => all[all.len() - 1],
            Some(current) => {
                let index = all.iter().position(|o| *o == current).unwrap_or(0);
                let len = all.len();
                if forward {
                    all[(index + 1) % len]
                } else {
                    all[(index + len - 1) % len]
                }
            }
        };
        self.select(next);
    }

    /// Checks the picked answer. Returns `None` when nothing is picked or
    /// the answer was already submitted.
    pub fn submit(&mut self) -> Option<bool> {
        if self.revealed || self.finished {
            return None;
        }
        let selected = self.selected?;
        let question = self.current()?;
        let correct = question.correct() == Some(selected);

        self.answers.truncate(self.current);
        self.answers.push(correct);
        self.revealed = true;
        Some(correct)
    }

    /// Goes to the next question, or finishes after the last one. Only
    /// valid after [`Quiz::submit`].
    pub fn advance(&mut self) {
        if !self.revealed {
            return;
        }
        if self.is_last() {
            self.finished = true;
        } else {
            self.current += 1;
            self.selected = None;
            self.revealed = false;
        }
    }

    /// Starts over with the same questions.
    pub fn retry(&mut self) {
        *self = Self::new(mem::take(&mut self.questions));
    }

    pub fn score(&self) -> QuizScore {
        let correct = self.answers.iter().filter(|ok| **ok).count();
        let total = self.questions.len();
        let percent = if total == 0 {
            0
        } else {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        };
        QuizScore {
            correct,
            incorrect: self.answers.len() - correct,
            total,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn question(id: u64, correct: &str, difficulty: &str) -> Value {
        json!({
            "question_id": id,
            "syllabus_id": 10,
            "difficulty": difficulty,
            "question_text": format!("Question {id}?"),
            "option_a": "one",
            "option_b": "two",
            "option_c": "three",
            "option_d": "four",
            "correct_option": correct,
            "solution": "Count them.",
            "is_active": true,
            "created_at": "2024-01-01T00:00:00"
        })
    }

    fn answer(quiz: &mut Quiz, option: CorrectOption) -> Option<bool> {
        quiz.select(option);
        let result = quiz.submit();
        quiz.advance();
        result
    }

    #[test]
    fn test_from_payload_keeps_only_active_questions() {
        let mut inactive = question(2, "A", "easy");
        inactive["is_active"] = json!(false);
        let mut unflagged = question(3, "A", "easy");
        unflagged.as_object_mut().unwrap().remove("is_active");
        let payload = json!([question(1, "B", "easy"), inactive, unflagged, "junk"]);

        let quiz = Quiz::from_payload(&payload, None);
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.current().unwrap().question_id, Some(1));
    }

    #[test]
    fn test_from_payload_accepts_wrapped_lists() {
        let wrapped = json!({"questions": [question(1, "A", "easy")]});
        assert_eq!(Quiz::from_payload(&wrapped, None).len(), 1);

        let data = json!({"data": [question(1, "A", "easy"), question(2, "C", "hard")]});
        assert_eq!(Quiz::from_payload(&data, None).len(), 2);

        assert!(Quiz::from_payload(&json!({"detail": "Not found"}), None).is_empty());
        assert!(Quiz::from_payload(&Value::Null, None).is_empty());
    }

    #[test]
    fn test_from_payload_filters_difficulty_case_insensitively() {
        let payload = json!([
            question(1, "A", "Easy"),
            question(2, "B", "hard"),
            question(3, "C", "EASY")
        ]);
        let quiz = Quiz::from_payload(&payload, Some(Difficulty::Easy));
        assert_eq!(quiz.len(), 2);
        assert_eq!(
            Quiz::from_payload(&payload, Some(Difficulty::Medium)).len(),
            0
        );
    }

    #[test]
    fn test_correct_option_reads_first_letter() {
        let mut q = QuizQuestion {
            correct_option: Some("c".to_string()),
            ..Default::default()
        };
        assert_eq!(q.correct(), Some(CorrectOption::C));
        q.correct_option = Some("D) four".to_string());
        assert_eq!(q.correct(), Some(CorrectOption::D));
        q.correct_option = None;
        assert_eq!(q.correct(), None);
    }

    #[test]
    fn test_submit_requires_a_pick_and_locks_the_answer() {
        let mut quiz = Quiz::from_payload(&json!([question(1, "B", "easy")]), None);
        assert_eq!(quiz.submit(), None);

        quiz.select(CorrectOption::A);
        assert_eq!(quiz.submit(), Some(false));
        assert_eq!(quiz.last_answer(), Some(false));

        quiz.select(CorrectOption::B);
        assert_eq!(quiz.selected(), Some(CorrectOption::A));
        assert_eq!(quiz.submit(), None);
    }

    #[test]
    fn test_advance_walks_questions_then_finishes() {
        let payload = json!([question(1, "A", "easy"), question(2, "B", "easy")]);
        let mut quiz = Quiz::from_payload(&payload, None);

        quiz.advance();
        assert_eq!(quiz.position(), 0);

        assert_eq!(answer(&mut quiz, CorrectOption::A), Some(true));
        assert_eq!(quiz.position(), 1);
        assert_eq!(quiz.selected(), None);
        assert!(quiz.is_last());

        assert_eq!(answer(&mut quiz, CorrectOption::C), Some(false));
        assert!(quiz.is_finished());

        let score = quiz.score();
        assert_eq!(score.correct, 1);
        assert_eq!(score.incorrect, 1);
        assert_eq!(score.total, 2);
        assert_eq!(score.percent, 50);
        assert_eq!(score.verdict(), "Keep practicing! You're making progress!");
    }

    #[test]
    fn test_score_rounds_and_grades() {
        let payload = json!([
            question(1, "A", "easy"),
            question(2, "A", "easy"),
            question(3, "A", "easy")
        ]);
        let mut quiz = Quiz::from_payload(&payload, None);
        answer(&mut quiz, CorrectOption::A);
        answer(&mut quiz, CorrectOption::A);
        answer(&mut quiz, CorrectOption::B);

        let score = quiz.score();
        assert_eq!(score.percent, 67);
        assert_eq!(score.verdict(), "Good work! Keep practicing to improve!");

        let mut perfect = Quiz::from_payload(&json!([question(1, "D", "easy")]), None);
        answer(&mut perfect, CorrectOption::D);
        assert_eq!(perfect.score().percent, 100);
        assert_eq!(
            perfect.score().verdict(),
            "Excellent! You've mastered this topic!"
        );
    }

    #[test]
    fn test_retry_resets_progress() {
        let mut quiz = Quiz::from_payload(&json!([question(1, "A", "easy")]), None);
        answer(&mut quiz, CorrectOption::A);
        assert!(quiz.is_finished());

        quiz.retry();
        assert!(!quiz.is_finished());
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.position(), 0);
        assert_eq!(quiz.score().correct, 0);
    }

    #[test]
    fn test_cycle_wraps_through_letters() {
        let mut quiz = Quiz::from_payload(&json!([question(1, "A", "easy")]), None);
        quiz.cycle(false);
        assert_eq!(quiz.selected(), Some(CorrectOption::D));
        quiz.cycle(true);
        assert_eq!(quiz.selected(), Some(CorrectOption::A));
    }
}
