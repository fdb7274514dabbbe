//! The action table: every form the client offers and how its fields
//! become an [`ApiRequest`].
//!
//! Forms are described declaratively by [`FieldSpec`]s. [`build_request`]
//! validates the collected values locally; a validation error means no
//! request is sent.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, NaiveDate};

use reqwest::Method;

use crate::api::{ApiRequest, success_status};
use crate::models::{
    CorrectOption, Credentials, Difficulty, Exam, ExamUpdate, Note, Question, QuestionFilter,
    QuestionUpdate, Section, SectionUpdate, Signup, SyllabusTopic,
};
use crate::session::Screen;

/// Raw form input keyed by [`FieldSpec::key`].
pub type FieldValues = BTreeMap<String, String>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Exams,
    Sections,
    Syllabus,
    Notes,
    Questions,
    Analytics,
    Auth,
}

impl Module {
    pub const ALL: [Module; 7] = [
        Module::Exams,
        Module::Sections,
        Module::Syllabus,
        Module::Notes,
        Module::Questions,
        Module::Analytics,
        Module::Auth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Module::Exams => "Exams",
            Module::Sections => "Sections",
            Module::Syllabus => "Syllabus",
            Module::Notes => "Notes",
            Module::Questions => "Questions",
            Module::Analytics => "Analytics",
            Module::Auth => "Auth",
        }
    }

    /// Name used on the command line (`olympiad call <module> ...`).
    pub fn cli_name(self) -> &'static str {
        match self {
            Module::Exams => "exams",
            Module::Sections => "sections",
            Module::Syllabus => "syllabus",
            Module::Notes => "notes",
            Module::Questions => "questions",
            Module::Analytics => "analytics",
            Module::Auth => "auth",
        }
    }

    pub fn from_cli_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.cli_name().eq_ignore_ascii_case(name))
    }

    pub fn actions(self) -> &'static [Action] {
        match self {
            Module::Exams => &[
                Action::ListExams,
                Action::GetExam,
                Action::CreateExam,
                Action::UpdateExam,
                Action::DeleteExam,
            ],
            Module::Sections => &[
                Action::ListSections,
                Action::CreateSection,
                Action::UpdateSection,
                Action::DeleteSection,
            ],
            Module::Syllabus => &[
                Action::GetSyllabus,
                Action::CreateTopic,
                Action::UpdateTopic,
                Action::DeleteTopic,
            ],
            Module::Notes => &[
                Action::ListNotes,
                Action::CreateNote,
                Action::UpdateNote,
                Action::DeleteNote,
            ],
            Module::Questions => &[
                Action::ListQuestions,
                Action::QuestionsByTopic,
                Action::AddQuestion,
                Action::UpdateQuestion,
                Action::DeleteQuestion,
            ],
            Module::Analytics => &[Action::ExamOverview, Action::ExamAnalytics],
            Module::Auth => &[Action::Signup, Action::Login],
        }
    }

    pub fn find_action(self, cli_name: &str) -> Option<Action> {
        let name = cli_name.trim();
        self.actions()
            .iter()
            .copied()
            .find(|a| a.cli_name().eq_ignore_ascii_case(name))
    }
}

/// Actions reachable from a dashboard screen, in display order.
///
/// Static screens have none.
pub fn actions_for_screen(screen: Screen) -> Vec<Action> {
    let modules: &[Module] = match screen {
        Screen::MyExams => &[Module::Exams, Module::Sections, Module::Syllabus],
        Screen::Practice => &[Module::Questions],
        Screen::Analytics => &[Module::Analytics],
        Screen::StudyNotes => &[Module::Notes],
        Screen::Home
        | Screen::Dashboard
        | Screen::Bookmarks
        | Screen::Profile
        | Screen::Settings => &[],
    };
    modules
        .iter()
        .flat_map(|m| m.actions().iter().copied())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ListExams,
    GetExam,
    CreateExam,
    UpdateExam,
    DeleteExam,
    ListSections,
    CreateSection,
    UpdateSection,
    DeleteSection,
    GetSyllabus,
    CreateTopic,
    UpdateTopic,
    DeleteTopic,
    ListNotes,
    CreateNote,
    UpdateNote,
    DeleteNote,
    ListQuestions,
    QuestionsByTopic,
    AddQuestion,
    UpdateQuestion,
    DeleteQuestion,
    ExamOverview,
    ExamAnalytics,
    Signup,
    Login,
}

impl Action {
    pub fn module(self) -> Module {
        match self {
            Action::ListExams
            | Action::GetExam
            | Action::CreateExam
            | Action::UpdateExam
            | Action::DeleteExam => Module::Exams,
            Action::ListSections
            | Action::CreateSection
            | Action::UpdateSection
            | Action::DeleteSection => Module::Sections,
            Action::GetSyllabus
            | Action::CreateTopic
            | Action::UpdateTopic
            | Action::DeleteTopic => Module::Syllabus,
            Action::ListNotes | Action::CreateNote | Action::UpdateNote | Action::DeleteNote => {
                Module::Notes
            }
            Action::ListQuestions
            | Action::QuestionsByTopic
            | Action::AddQuestion
            | Action::UpdateQuestion
            | Action::DeleteQuestion => Module::Questions,
            Action::ExamOverview | Action::ExamAnalytics => Module::Analytics,
            Action::Signup | Action::Login => Module::Auth,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::ListExams => "Get All Exams",
            Action::GetExam => "Get Single Exam",
            Action::CreateExam => "Create Exam",
            Action::UpdateExam => "Update Exam",
            Action::DeleteExam => "Delete Exam",
            Action::ListSections => "Get All Sections",
            Action::CreateSection => "Create Section",
            Action::UpdateSection => "Update Section",
            Action::DeleteSection => "Delete Section",
            Action::GetSyllabus => "Get Syllabus",
            Action::CreateTopic => "Create Topic",
            Action::UpdateTopic => "Update Topic",
            Action::DeleteTopic => "Delete Topic",
            Action::ListNotes => "Get All Notes",
            Action::CreateNote => "Create Note",
            Action::UpdateNote => "Update Note",
            Action::DeleteNote => "Delete Note",
            Action::ListQuestions => "Get All Questions",
            Action::QuestionsByTopic => "Get Questions by Topic",
            Action::AddQuestion => "Add Question",
            Action::UpdateQuestion => "Update Question",
            Action::DeleteQuestion => "Delete Question",
            Action::ExamOverview => "Get Full Exam Overview",
            Action::ExamAnalytics => "Get Exam Analytics",
            Action::Signup => "Signup",
            Action::Login => "Login",
        }
    }

    /// Text of the submit button.
    pub fn submit_label(self) -> &'static str {
        match self {
            Action::ListExams => "Fetch All Exams",
            Action::GetExam => "Fetch Exam",
            Action::ListSections => "Fetch Sections",
            Action::GetSyllabus => "Fetch Syllabus",
            Action::ListNotes => "Fetch Notes",
            Action::ListQuestions | Action::QuestionsByTopic => "Fetch Questions",
            Action::ExamOverview => "Fetch Full Overview",
            Action::ExamAnalytics => "Fetch Analytics",
            Action::Signup => "Create Account",
            Action::Login => "Sign In",
            other => other.label(),
        }
    }

    pub fn cli_name(self) -> &'static str {
        match self {
            Action::ListExams
            | Action::ListSections
            | Action::ListNotes
            | Action::ListQuestions => "list",
            Action::GetExam | Action::GetSyllabus => "get",
            Action::CreateExam
            | Action::CreateSection
            | Action::CreateTopic
            | Action::CreateNote => "create",
            Action::AddQuestion => "add",
            Action::UpdateExam
            | Action::UpdateSection
            | Action::UpdateTopic
            | Action::UpdateNote
            | Action::UpdateQuestion => "update",
            Action::DeleteExam
            | Action::DeleteSection
            | Action::DeleteTopic
            | Action::DeleteNote
            | Action::DeleteQuestion => "delete",
            Action::QuestionsByTopic => "by-topic",
            Action::ExamOverview => "overview",
            Action::ExamAnalytics => "analytics",
            Action::Signup => "signup",
            Action::Login => "login",
        }
    }

    /// Message shown when a write succeeds. Reads show only the payload.
    pub fn success_message(self) -> Option<&'static str> {
        let message = match self {
            Action::CreateExam => "Exam created!",
            Action::UpdateExam => "Exam updated!",
            Action::DeleteExam => "Exam deleted!",
            Action::CreateSection => "Section created!",
            Action::UpdateSection => "Section updated!",
            Action::DeleteSection => "Section deleted!",
            Action::CreateTopic => "Topic created!",
            Action::UpdateTopic => "Topic updated!",
            Action::DeleteTopic => "Topic deleted!",
            Action::CreateNote => "Note created!",
            Action::UpdateNote => "Note updated!",
            Action::DeleteNote => "Note deleted!",
            Action::AddQuestion => "Question added!",
            Action::UpdateQuestion => "Question updated!",
            Action::DeleteQuestion => "Question deleted!",
            Action::Signup => "Account created successfully! Please sign in.",
            _ => return None,
        };
        Some(message)
    }

    /// HTTP verb of the request this action builds.
    pub fn method(self) -> Method {
        match self {
            Action::ListExams
            | Action::GetExam
            | Action::ListSections
            | Action::GetSyllabus
            | Action::ListNotes
            | Action::ListQuestions
            | Action::QuestionsByTopic
            | Action::ExamOverview
            | Action::ExamAnalytics => Method::GET,
            Action::CreateExam
            | Action::CreateSection
            | Action::CreateTopic
            | Action::CreateNote
            | Action::AddQuestion
            | Action::Signup
            | Action::Login => Method::POST,
            Action::UpdateExam
            | Action::UpdateSection
            | Action::UpdateTopic
            | Action::UpdateNote
            | Action::UpdateQuestion => Method::PUT,
            Action::DeleteExam
            | Action::DeleteSection
            | Action::DeleteTopic
            | Action::DeleteNote
            | Action::DeleteQuestion => Method::DELETE,
        }
    }

    /// The only status treated as success; derived from [`Action::method`]
    /// the same way as [`ApiRequest::expected_status`].
    pub fn expected_status(self) -> u16 {
        success_status(&self.method(), self == Action::Login)
    }

    /// Key of the path id field, if the action targets one resource.
    pub fn id_field(self) -> Option<&'static str> {
        self.fields()
            .first()
            .filter(|f| f.key.ends_with("_id") && f.required)
            .map(|f| f.key)
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Action::ListExams => &[],
            Action::GetExam
            | Action::DeleteExam
            | Action::ListSections
            | Action::ListNotes
            | Action::ExamOverview
            | Action::ExamAnalytics => &[EXAM_ID],
            Action::CreateExam => CREATE_EXAM,
            Action::UpdateExam => UPDATE_EXAM,
            Action::CreateSection => CREATE_SECTION,
            Action::UpdateSection => UPDATE_SECTION,
            Action::DeleteSection | Action::GetSyllabus => &[SECTION_ID],
            Action::CreateTopic => CREATE_TOPIC,
            Action::UpdateTopic => UPDATE_TOPIC,
            Action::DeleteTopic | Action::QuestionsByTopic => &[SYLLABUS_ID],
            Action::CreateNote => CREATE_NOTE,
            Action::UpdateNote => UPDATE_NOTE,
            Action::DeleteNote => &[NOTE_ID],
            Action::ListQuestions => LIST_QUESTIONS,
            Action::AddQuestion => ADD_QUESTION,
            Action::UpdateQuestion => UPDATE_QUESTION,
            Action::DeleteQuestion => &[QUESTION_ID],
            Action::Signup => SIGNUP,
            Action::Login => LOGIN,
        }
    }

    pub fn field(self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.key == key)
    }

    /// Initial form values: every field at its default.
    pub fn default_values(self) -> FieldValues {
        self.fields()
            .iter()
            .map(|f| (f.key.to_string(), f.default.to_string()))
            .collect()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Free text that may span several lines.
    LongText,
    Email,
    Password {
        min_len: usize,
    },
    /// Non-negative integer with an inclusive range.
    Number {
        min: u64,
        max: Option<u64>,
    },
    /// One of a fixed set of options. An optional choice also accepts "".
    Choice(&'static [&'static str]),
    /// `YYYY-MM-DD`, no earlier than `min` and no later than today.
    Date {
        min: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: &'static str,
}

impl FieldSpec {
    const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
            required: true,
            default: "",
        }
    }

    const fn long_text(key: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::LongText,
            ..Self::text(key, label)
        }
    }

    const fn number(key: &'static str, label: &'static str, min: u64, default: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Number { min, max: None },
            required: true,
            default,
        }
    }

    const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }

    const fn with_default(self, default: &'static str) -> Self {
        Self { default, ..self }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self.kind, FieldKind::Password { .. })
    }
}

const DIFFICULTY_CHOICES: &[&str] = &["easy", "medium", "hard"];
const CORRECT_OPTION_CHOICES: &[&str] = &["A", "B", "C", "D"];

const EXAM_ID: FieldSpec = FieldSpec::number("exam_id", "Exam ID", 1, "1");
const SECTION_ID: FieldSpec = FieldSpec::number("section_id", "Section ID", 1, "1");
const SYLLABUS_ID: FieldSpec = FieldSpec::number("syllabus_id", "Syllabus ID", 1, "1");
const NOTE_ID: FieldSpec = FieldSpec::number("note_id", "Note ID", 1, "1");
const QUESTION_ID: FieldSpec = FieldSpec::number("question_id", "Question ID", 1, "1");

const GRADE: FieldSpec = FieldSpec {
    key: "grade",
    label: "Grade",
    kind: FieldKind::Number {
        min: 1,
        max: Some(12),
    },
    required: true,
    default: "1",
};

const CREATE_EXAM: &[FieldSpec] = &[
    FieldSpec::text("exam", "Exam Name"),
    GRADE,
    FieldSpec::number("level", "Level", 1, "1"),
    FieldSpec::number("total_questions", "Total Questions", 0, "0"),
    FieldSpec::number("total_marks", "Total Marks", 0, "0"),
    FieldSpec::number("total_time_mins", "Total Time (mins)", 1, "1"),
];

const UPDATE_EXAM: &[FieldSpec] = &[
    EXAM_ID,
    FieldSpec::number("total_marks", "Total Marks", 0, "0"),
    FieldSpec::number("total_time_mins", "Total Time (mins)", 1, "1"),
];

const CREATE_SECTION: &[FieldSpec] = &[
    EXAM_ID,
    FieldSpec::text("section", "Section Name"),
    FieldSpec::number("no_of_questions", "Number of Questions", 1, "1"),
    FieldSpec::number("marks_per_question", "Marks per Question", 1, "1"),
    FieldSpec::number("total_marks", "Total Marks", 1, "1"),
];

const UPDATE_SECTION: &[FieldSpec] = &[
    SECTION_ID,
    FieldSpec::number("no_of_questions", "Number of Questions", 1, "1"),
    FieldSpec::number("total_marks", "Total Marks", 1, "1"),
];

const CREATE_TOPIC: &[FieldSpec] = &[
    SECTION_ID,
    FieldSpec::text("topic", "Topic"),
    FieldSpec::text("subtopic", "Subtopic (optional)").optional(),
];

const UPDATE_TOPIC: &[FieldSpec] = &[
    SYLLABUS_ID,
    FieldSpec::text("topic", "Topic"),
    FieldSpec::text("subtopic", "Subtopic").optional(),
];

const CREATE_NOTE: &[FieldSpec] = &[EXAM_ID, FieldSpec::long_text("note", "Note")];

const UPDATE_NOTE: &[FieldSpec] = &[NOTE_ID, FieldSpec::long_text("note", "Note")];

const LIST_QUESTIONS: &[FieldSpec] = &[
    FieldSpec::number("syllabus_id", "Syllabus ID (optional)", 1, "").optional(),
    FieldSpec {
        key: "difficulty",
        label: "Difficulty (optional)",
        kind: FieldKind::Choice(DIFFICULTY_CHOICES),
        required: false,
        default: "",
    },
];

const ADD_QUESTION: &[FieldSpec] = &[
    SYLLABUS_ID,
    FieldSpec {
        key: "difficulty",
        label: "Difficulty",
        kind: FieldKind::Choice(DIFFICULTY_CHOICES),
        required: true,
        default: "easy",
    },
    FieldSpec::long_text("question_text", "Question Text"),
    FieldSpec::text("option_a", "Option A"),
    FieldSpec::text("option_b", "Option B"),
    FieldSpec::text("option_c", "Option C"),
    FieldSpec::text("option_d", "Option D"),
    FieldSpec {
        key: "correct_option",
        label: "Correct Option",
        kind: FieldKind::Choice(CORRECT_OPTION_CHOICES),
        required: true,
        default: "A",
    },
    FieldSpec::long_text("solution", "Solution (optional)").optional(),
];

const UPDATE_QUESTION: &[FieldSpec] = &[
    QUESTION_ID,
    FieldSpec::long_text("solution", "New Solution"),
];

const SIGNUP: &[FieldSpec] = &[
    FieldSpec::text("first_name", "First Name"),
    FieldSpec::text("last_name", "Last Name"),
    FieldSpec {
        kind: FieldKind::Email,
        ..FieldSpec::text("email", "Email")
    },
    FieldSpec {
        kind: FieldKind::Password {
            min_len: PASSWORD_MIN_LEN,
        },
        ..FieldSpec::text("password", "Password")
    },
    GRADE.with_default("8"),
    FieldSpec {
        key: "date_of_birth",
        label: "Date of Birth (YYYY-MM-DD, blank for today)",
        kind: FieldKind::Date { min: "2000-01-01" },
        required: false,
        default: "",
    },
    FieldSpec::text("country_code", "Country Code")
        .optional()
        .with_default("+91"),
    FieldSpec::text("phone_number", "Phone Number"),
    FieldSpec::text("profile_image", "Profile Image URL").optional(),
    FieldSpec::text("school_name", "School Name"),
    FieldSpec::text("city", "City"),
    FieldSpec::text("state", "State"),
];

const LOGIN: &[FieldSpec] = &[
    FieldSpec::text("email", "Email"),
    FieldSpec {
        kind: FieldKind::Password { min_len: 0 },
        ..FieldSpec::text("password", "Password")
    },
];

/// Why a form was rejected before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is blank.
    Missing { label: &'static str },
    /// A required signup field is blank.
    IncompleteSignup,
    /// Email or password is blank on the sign-in form.
    IncompleteLogin,
    PasswordTooShort { min_len: usize },
    InvalidEmail,
    NotANumber { label: &'static str },
    OutOfRange {
        label: &'static str,
        min: u64,
        max: Option<u64>,
    },
    InvalidDate { label: &'static str },
    UnknownChoice {
        label: &'static str,
        options: &'static [&'static str],
    },
    /// A key that the action's form does not have.
    UnknownField(String),
    /// A command-line assignment without `=`.
    MalformedAssignment(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Missing { label } => write!(f, "{label} is required"),
            ValidationError::IncompleteSignup => f.write_str("Please fill in all required fields"),
            ValidationError::IncompleteLogin => f.write_str("Please fill in all fields"),
            ValidationError::PasswordTooShort { min_len } => {
                write!(f, "Password must be at least {min_len} characters long")
            }
            ValidationError::InvalidEmail => f.write_str("Please enter a valid email address"),
            ValidationError::NotANumber { label } => write!(f, "{label} must be a whole number"),
            ValidationError::OutOfRange { label, min, max } => match max {
                Some(max) => write!(f, "{label} must be between {min} and {max}"),
                None => write!(f, "{label} must be at least {min}"),
            },
            ValidationError::InvalidDate { label } => {
                write!(f, "{label} must be a valid date between 2000-01-01 and today")
            }
            ValidationError::UnknownChoice { label, options } => {
                write!(f, "{label} must be one of: {}", options.join(", "))
            }
            ValidationError::UnknownField(key) => write!(f, "Unknown field: {key}"),
            ValidationError::MalformedAssignment(raw) => {
                write!(f, "Expected key=value, got: {raw}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parses a `key=value` assignment for `action`.
pub fn parse_assignment(
    action: Action,
    raw: &str,
) -> Result<(String, String), ValidationError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ValidationError::MalformedAssignment(raw.to_string()))?;
    let key = key.trim();
    if action.field(key).is_none() {
        return Err(ValidationError::UnknownField(key.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Validates `values` against the action's form and builds the request.
///
/// Missing keys count as blank. Checks run in this order: required
/// fields, password length, then per-field shape.
pub fn build_request(action: Action, values: &FieldValues) -> Result<ApiRequest, ValidationError> {
    let form = Form { action, values };
    form.validate()?;

    let request = match action {
        Action::ListExams => ApiRequest::ListExams,
        Action::GetExam => ApiRequest::GetExam {
            exam_id: form.id("exam_id")?,
        },
        Action::CreateExam => ApiRequest::CreateExam(Exam {
            exam: form.text("exam"),
            grade: form.count("grade")?,
            level: form.count("level")?,
            total_questions: form.count("total_questions")?,
            total_marks: form.count("total_marks")?,
            total_time_mins: form.count("total_time_mins")?,
        }),
        Action::UpdateExam => ApiRequest::UpdateExam {
            exam_id: form.id("exam_id")?,
            update: ExamUpdate {
                total_marks: form.count("total_marks")?,
                total_time_mins: form.count("total_time_mins")?,
            },
        },
        Action::DeleteExam => ApiRequest::DeleteExam {
            exam_id: form.id("exam_id")?,
        },
        Action::ListSections => ApiRequest::ListSections {
            exam_id: form.id("exam_id")?,
        },
        Action::CreateSection => ApiRequest::CreateSection {
            exam_id: form.id("exam_id")?,
            section: Section {
                section: form.text("section"),
                no_of_questions: form.count("no_of_questions")?,
                marks_per_question: form.count("marks_per_question")?,
                total_marks: form.count("total_marks")?,
            },
        },
        Action::UpdateSection => ApiRequest::UpdateSection {
            section_id: form.id("section_id")?,
            update: SectionUpdate {
                no_of_questions: form.count("no_of_questions")?,
                total_marks: form.count("total_marks")?,
            },
        },
        Action::DeleteSection => ApiRequest::DeleteSection {
            section_id: form.id("section_id")?,
        },
        Action::GetSyllabus => ApiRequest::GetSyllabus {
            section_id: form.id("section_id")?,
        },
        Action::CreateTopic => ApiRequest::CreateTopic {
            section_id: form.id("section_id")?,
            topic: form.topic(),
        },
        Action::UpdateTopic => ApiRequest::UpdateTopic {
            syllabus_id: form.id("syllabus_id")?,
            topic: form.topic(),
        },
        Action::DeleteTopic => ApiRequest::DeleteTopic {
            syllabus_id: form.id("syllabus_id")?,
        },
        Action::ListNotes => ApiRequest::ListNotes {
            exam_id: form.id("exam_id")?,
        },
        Action::CreateNote => ApiRequest::CreateNote {
            exam_id: form.id("exam_id")?,
            note: Note {
                note: form.text("note"),
            },
        },
        Action::UpdateNote => ApiRequest::UpdateNote {
            note_id: form.id("note_id")?,
            note: Note {
                note: form.text("note"),
            },
        },
        Action::DeleteNote => ApiRequest::DeleteNote {
            note_id: form.id("note_id")?,
        },
        Action::ListQuestions => ApiRequest::ListQuestions(QuestionFilter {
            syllabus_id: form.optional_id("syllabus_id")?,
            difficulty: form.optional_choice("difficulty", Difficulty::parse)?,
        }),
        Action::QuestionsByTopic => ApiRequest::QuestionsByTopic {
            syllabus_id: form.id("syllabus_id")?,
        },
        Action::AddQuestion => ApiRequest::AddQuestion {
            syllabus_id: form.id("syllabus_id")?,
            question: Question {
                difficulty: form.choice("difficulty", Difficulty::parse)?,
                question_text: form.text("question_text"),
                option_a: form.text("option_a"),
                option_b: form.text("option_b"),
                option_c: form.text("option_c"),
                option_d: form.text("option_d"),
                correct_option: form.choice("correct_option", CorrectOption::parse)?,
                solution: form.text("solution"),
            },
        },
        Action::UpdateQuestion => ApiRequest::UpdateQuestion {
            question_id: form.id("question_id")?,
            update: QuestionUpdate {
                solution: form.text("solution"),
            },
        },
        Action::DeleteQuestion => ApiRequest::DeleteQuestion {
            question_id: form.id("question_id")?,
        },
        Action::ExamOverview => ApiRequest::ExamOverview {
            exam_id: form.id("exam_id")?,
        },
        Action::ExamAnalytics => ApiRequest::ExamAnalytics {
            exam_id: form.id("exam_id")?,
        },
        Action::Signup => ApiRequest::Signup(Signup {
            first_name: form.text("first_name"),
            last_name: form.text("last_name"),
            email: form.text("email"),
            password: form.secret("password"),
            grade: form.count("grade")?,
            date_of_birth: form.date("date_of_birth")?,
            country_code: form.text("country_code"),
            phone_number: form.text("phone_number"),
            profile_image: form.text("profile_image"),
            school_name: form.text("school_name"),
            city: form.text("city"),
            state: form.text("state"),
        }),
        Action::Login => ApiRequest::Login(Credentials {
            email: form.text("email"),
            password: form.secret("password"),
        }),
    };

    Ok(request)
}

struct Form<'a> {
    action: Action,
    values: &'a FieldValues,
}

impl Form<'_> {
    fn raw(&self, key: &str) -> &str {
        self.values.get(key).map_or("", String::as_str)
    }

    fn label(&self, key: &str) -> &'static str {
        self.action.field(key).map_or("Field", |f| f.label)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let fields = self.action.fields();

        if let Some(missing) = fields
            .iter()
            .find(|f| f.required && self.raw(f.key).trim().is_empty())
        {
            return Err(match self.action {
                Action::Signup => ValidationError::IncompleteSignup,
                Action::Login => ValidationError::IncompleteLogin,
                _ => ValidationError::Missing {
                    label: missing.label,
                },
            });
        }

        for field in fields {
            if let FieldKind::Password { min_len } = field.kind
                && self.raw(field.key).chars().count() < min_len
            {
                return Err(ValidationError::PasswordTooShort { min_len });
            }
        }

        for field in fields {
            let value = self.raw(field.key).trim();
            if value.is_empty() {
                continue;
            }
            match field.kind {
                FieldKind::Email if !value.contains('@') => {
                    return Err(ValidationError::InvalidEmail);
                }
                FieldKind::Number { min, max } => {
                    check_number(field.label, value, min, max)?;
                }
                FieldKind::Choice(options)
                    if !options.iter().any(|o| o.eq_ignore_ascii_case(value)) =>
                {
                    return Err(ValidationError::UnknownChoice {
                        label: field.label,
                        options,
                    });
                }
                FieldKind::Date { min } => {
                    check_date(field.label, value, min)?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Trimmed text; blank optional fields are sent as "".
    fn text(&self, key: &str) -> String {
        self.raw(key).trim().to_string()
    }

    /// Passwords are sent exactly as typed.
    fn secret(&self, key: &str) -> String {
        self.raw(key).to_string()
    }

    fn number(&self, key: &str) -> Result<u64, ValidationError> {
        self.raw(key)
            .trim()
            .parse()
            .map_err(|_parse_err: std::num::ParseIntError| ValidationError::NotANumber {
                label: self.label(key),
            })
    }

    fn id(&self, key: &str) -> Result<u64, ValidationError> {
        self.number(key)
    }

    fn count(&self, key: &str) -> Result<u32, ValidationError> {
        let value = self.number(key)?;
        u32::try_from(value).map_err(|_overflow| ValidationError::OutOfRange {
            label: self.label(key),
            min: 0,
            max: Some(u64::from(u32::MAX)),
        })
    }

    fn optional_id(&self, key: &str) -> Result<Option<u64>, ValidationError> {
        if self.raw(key).trim().is_empty() {
            Ok(None)
        } else {
            self.id(key).map(Some)
        }
    }

    fn choice<T>(&self, key: &str, parse: fn(&str) -> Option<T>) -> Result<T, ValidationError> {
        parse(self.raw(key)).ok_or_else(|| ValidationError::UnknownChoice {
            label: self.label(key),
            options: match self.action.field(key).map(|f| f.kind) {
                Some(FieldKind::Choice(options)) => options,
                _ => &[],
            },
        })
    }

    fn optional_choice<T>(
        &self,
        key: &str,
        parse: fn(&str) -> Option<T>,
    ) -> Result<Option<T>, ValidationError> {
        if self.raw(key).trim().is_empty() {
            Ok(None)
        } else {
            self.choice(key, parse).map(Some)
        }
    }

    fn topic(&self) -> SyllabusTopic {
        SyllabusTopic {
            topic: self.text("topic"),
            subtopic: self.text("subtopic"),
        }
    }

    /// A blank date means today.
    fn date(&self, key: &str) -> Result<String, ValidationError> {
        let value = self.raw(key).trim();
        if value.is_empty() {
            return Ok(today().format(DATE_FORMAT).to_string());
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .map_err(|_parse_err| ValidationError::InvalidDate {
                label: self.label(key),
            })
    }
}

fn check_number(
    label: &'static str,
    value: &str,
    min: u64,
    max: Option<u64>,
) -> Result<(), ValidationError> {
    let number: u64 = value
        .parse()
        .map_err(|_parse_err: std::num::ParseIntError| ValidationError::NotANumber { label })?;
    if number < min || max.is_some_and(|max| number > max) {
        return Err(ValidationError::OutOfRange { label, min, max });
    }
    Ok(())
}

fn check_date(label: &'static str, value: &str, min: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidDate { label };
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_parse_err| invalid())?;
    let min = NaiveDate::parse_from_str(min, DATE_FORMAT).map_err(|_parse_err| invalid())?;
    if date < min || date > today() {
        return Err(invalid());
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
