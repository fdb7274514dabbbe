//! View models of the backend resources.
//!
//! These are request payloads built from form input, or the user record
//! returned by `/login`. Nothing here is cached between screens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Question difficulty accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Correct answer letter of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CorrectOption {
    #[default]
    A,
    B,
    C,
    D,
}

impl CorrectOption {
    pub fn all() -> &'static [CorrectOption] {
        &[
            CorrectOption::A,
            CorrectOption::B,
            CorrectOption::C,
            CorrectOption::D,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CorrectOption::A => "A",
            CorrectOption::B => "B",
            CorrectOption::C => "C",
            CorrectOption::D => "D",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|o| o.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    pub exam: String,
    pub grade: u32,
    pub level: u32,
    pub total_questions: u32,
    pub total_marks: u32,
    pub total_time_mins: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamUpdate {
    pub total_marks: u32,
    pub total_time_mins: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section: String,
    pub no_of_questions: u32,
    pub marks_per_question: u32,
    pub total_marks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionUpdate {
    pub no_of_questions: u32,
    pub total_marks: u32,
}

/// Syllabus entry. An omitted subtopic is sent as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusTopic {
    pub topic: String,
    pub subtopic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub difficulty: Difficulty,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: CorrectOption,
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionUpdate {
    pub solution: String,
}

/// Optional filters for `GET /questions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub syllabus_id: Option<u64>,
    pub difficulty: Option<Difficulty>,
}

impl QuestionFilter {
    /// Query pairs in a stable order; absent filters are omitted.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.syllabus_id {
            pairs.push(("syllabus_id".to_string(), id.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            pairs.push(("difficulty".to_string(), difficulty.as_str().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Account creation payload. The password only ever travels in this
/// request; it is never part of a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub grade: u32,
    pub date_of_birth: String,
    pub country_code: String,
    pub phone_number: String,
    pub profile_image: String,
    pub school_name: String,
    pub city: String,
    pub state: String,
}

/// The signed-in user as returned by `/login`.
///
/// The body object is stored as received. Accessors read fields loosely:
/// the backend may send numbers, strings or nulls for any of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    /// Parses a login response body. Only JSON objects are user records.
    pub fn from_json(body: &Value) -> Option<Self> {
        body.as_object().cloned().map(Self)
    }

    /// The login body exactly as the backend sent it.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Field as display text. Null, missing and empty values are `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn display_first_name(&self) -> String {
        self.text("first_name").unwrap_or_else(|| "User".to_string())
    }

    pub fn display_grade(&self) -> String {
        self.text("grade").unwrap_or_else(|| "N/A".to_string())
    }

    pub fn initial(&self) -> char {
        self.display_first_name()
            .chars()
            .next()
            .map_or('U', |c| c.to_ascii_uppercase())
    }
}

impl From<Map<String, Value>> for UserRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_record_keeps_login_body_verbatim() {
        let body = json!({
            "id": 42,
            "first_name": "Asha",
            "email": "asha@example.com",
            "grade": 8,
            "phone_number": 9876543210_u64,
            "profile_image": null,
            "is_active": true
        });

        let record = UserRecord::from_json(&body).unwrap();
        assert_eq!(record.to_json(), body);
        assert_eq!(serde_json::to_value(&record).unwrap(), body);
        assert_eq!(record.text("first_name").as_deref(), Some("Asha"));
        assert_eq!(record.text("phone_number").as_deref(), Some("9876543210"));
        assert_eq!(record.text("profile_image"), None);
        assert_eq!(record.display_grade(), "8");
    }

    #[test]
    fn test_user_record_rejects_non_object_body() {
        assert!(UserRecord::from_json(&json!("token")).is_none());
        assert!(UserRecord::from_json(&Value::Null).is_none());
        assert!(UserRecord::from_json(&json!([{"first_name": "Asha"}])).is_none());
    }

    #[test]
    fn test_user_record_display_fallbacks() {
        let record = UserRecord::default();
        assert_eq!(record.display_first_name(), "User");
        assert_eq!(record.display_grade(), "N/A");
        assert_eq!(record.initial(), 'U');

        let blank = UserRecord::from_json(&json!({"first_name": "", "grade": null})).unwrap();
        assert_eq!(blank.display_first_name(), "User");
        assert_eq!(blank.display_grade(), "N/A");
    }

    #[test]
    fn test_question_serializes_enums_in_backend_format() {
        let question = Question {
            difficulty: Difficulty::Medium,
            question_text: "2 + 2?".into(),
            option_a: "3".into(),
            option_b: "4".into(),
            option_c: "5".into(),
            option_d: "22".into(),
            correct_option: CorrectOption::B,
            solution: String::new(),
        };

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["difficulty"], "medium");
        assert_eq!(value["correct_option"], "B");
    }

    #[test]
    fn test_question_filter_omits_absent_params() {
        assert!(QuestionFilter::default().query_pairs().is_empty());

        let filter = QuestionFilter {
            syllabus_id: Some(3),
            difficulty: Some(Difficulty::Hard),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("syllabus_id".to_string(), "3".to_string()),
                ("difficulty".to_string(), "hard".to_string()),
            ]
        );
    }

    #[test]
    fn test_choice_parsing_is_case_insensitive() {
        assert_eq!(Difficulty::parse(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("extreme"), None);
        assert_eq!(CorrectOption::parse("c"), Some(CorrectOption::C));
        assert_eq!(CorrectOption::parse("E"), None);
    }
}
