//! One variant per backend endpoint.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::models::{
    Credentials, Exam, ExamUpdate, Note, Question, QuestionFilter, QuestionUpdate, Section,
    SectionUpdate, Signup, SyllabusTopic,
};

/// A fully validated request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    ListExams,
    GetExam { exam_id: u64 },
    CreateExam(Exam),
    UpdateExam { exam_id: u64, update: ExamUpdate },
    DeleteExam { exam_id: u64 },

    ListSections { exam_id: u64 },
    CreateSection { exam_id: u64, section: Section },
    UpdateSection { section_id: u64, update: SectionUpdate },
    DeleteSection { section_id: u64 },

    GetSyllabus { section_id: u64 },
    CreateTopic { section_id: u64, topic: SyllabusTopic },
    UpdateTopic { syllabus_id: u64, topic: SyllabusTopic },
    DeleteTopic { syllabus_id: u64 },

    ListNotes { exam_id: u64 },
    CreateNote { exam_id: u64, note: Note },
    UpdateNote { note_id: u64, note: Note },
    DeleteNote { note_id: u64 },

    ListQuestions(QuestionFilter),
    QuestionsByTopic { syllabus_id: u64 },
    AddQuestion { syllabus_id: u64, question: Question },
    UpdateQuestion { question_id: u64, update: QuestionUpdate },
    DeleteQuestion { question_id: u64 },

    ExamOverview { exam_id: u64 },
    ExamAnalytics { exam_id: u64 },

    Signup(Signup),
    Login(Credentials),
}

/// The only status treated as success for a request sent with `method`.
/// Creating answers 201 and deleting 204; login is a POST that answers 200.
pub(crate) fn success_status(method: &Method, login: bool) -> u16 {
    if login {
        200
    } else if *method == Method::POST {
        201
    } else if *method == Method::DELETE {
        204
    } else {
        200
    }
}

impl ApiRequest {
    pub fn method(&self) -> Method {
        match self {
            ApiRequest::ListExams
            | ApiRequest::GetExam { .. }
            | ApiRequest::ListSections { .. }
            | ApiRequest::GetSyllabus { .. }
            | ApiRequest::ListNotes { .. }
            | ApiRequest::ListQuestions(_)
            | ApiRequest::QuestionsByTopic { .. }
            | ApiRequest::ExamOverview { .. }
            | ApiRequest::ExamAnalytics { .. } => Method::GET,

            ApiRequest::CreateExam(_)
            | ApiRequest::CreateSection { .. }
            | ApiRequest::CreateTopic { .. }
            | ApiRequest::CreateNote { .. }
            | ApiRequest::AddQuestion { .. }
            | ApiRequest::Signup(_)
            | ApiRequest::Login(_) => Method::POST,

            ApiRequest::UpdateExam { .. }
            | ApiRequest::UpdateSection { .. }
            | ApiRequest::UpdateTopic { .. }
            | ApiRequest::UpdateNote { .. }
            | ApiRequest::UpdateQuestion { .. } => Method::PUT,

            ApiRequest::DeleteExam { .. }
            | ApiRequest::DeleteSection { .. }
            | ApiRequest::DeleteTopic { .. }
            | ApiRequest::DeleteNote { .. }
            | ApiRequest::DeleteQuestion { .. } => Method::DELETE,
        }
    }

    /// Path relative to the base URL, always starting with `/`.
    pub fn path(&self) -> String {
        match self {
            ApiRequest::ListExams | ApiRequest::CreateExam(_) => "/exams".to_string(),
            ApiRequest::GetExam { exam_id }
            | ApiRequest::UpdateExam { exam_id, .. }
            | ApiRequest::DeleteExam { exam_id } => format!("/exams/{exam_id}"),

            ApiRequest::ListSections { exam_id } | ApiRequest::CreateSection { exam_id, .. } => {
                format!("/exams/{exam_id}/sections")
            }
            ApiRequest::UpdateSection { section_id, .. }
            | ApiRequest::DeleteSection { section_id } => format!("/sections/{section_id}"),

            ApiRequest::GetSyllabus { section_id } | ApiRequest::CreateTopic { section_id, .. } => {
                format!("/sections/{section_id}/syllabus")
            }
            ApiRequest::UpdateTopic { syllabus_id, .. } | ApiRequest::DeleteTopic { syllabus_id } => {
                format!("/syllabus/{syllabus_id}")
            }

            ApiRequest::ListNotes { exam_id } | ApiRequest::CreateNote { exam_id, .. } => {
                format!("/exams/{exam_id}/notes")
            }
            ApiRequest::UpdateNote { note_id, .. } | ApiRequest::DeleteNote { note_id } => {
                format!("/notes/{note_id}")
            }

            ApiRequest::ListQuestions(_) => "/questions".to_string(),
            ApiRequest::QuestionsByTopic { syllabus_id }
            | ApiRequest::AddQuestion { syllabus_id, .. } => {
                format!("/syllabus/{syllabus_id}/questions")
            }
            ApiRequest::UpdateQuestion { question_id, .. }
            | ApiRequest::DeleteQuestion { question_id } => format!("/questions/{question_id}"),

            ApiRequest::ExamOverview { exam_id } => format!("/exams/{exam_id}/overview"),
            ApiRequest::ExamAnalytics { exam_id } => format!("/analytics/exam/{exam_id}"),

            ApiRequest::Signup(_) => "/signup".to_string(),
            ApiRequest::Login(_) => "/login".to_string(),
        }
    }

    pub fn query(&self) -> Vec<(String, String)> {
        match self {
            ApiRequest::ListQuestions(filter) => filter.query_pairs(),
            _ => Vec::new(),
        }
    }

    /// JSON body for write requests, `None` for reads and deletes.
    pub fn body(&self) -> serde_json::Result<Option<Value>> {
        fn encode<T: Serialize>(value: &T) -> serde_json::Result<Option<Value>> {
            serde_json::to_value(value).map(Some)
        }

        match self {
            ApiRequest::CreateExam(exam) => encode(exam),
            ApiRequest::UpdateExam { update, .. } => encode(update),
            ApiRequest::CreateSection { section, .. } => encode(section),
            ApiRequest::UpdateSection { update, .. } => encode(update),
            ApiRequest::CreateTopic { topic, .. } | ApiRequest::UpdateTopic { topic, .. } => {
                encode(topic)
            }
            ApiRequest::CreateNote { note, .. } | ApiRequest::UpdateNote { note, .. } => {
                encode(note)
            }
            ApiRequest::AddQuestion { question, .. } => encode(question),
            ApiRequest::UpdateQuestion { update, .. } => encode(update),
            ApiRequest::Signup(signup) => encode(signup),
            ApiRequest::Login(credentials) => encode(credentials),
            _ => Ok(None),
        }
    }

    /// The only status treated as success.
    ///
    /// GET and PUT expect 200, POST 201, DELETE 204. Login is a POST that
    /// answers 200.
    pub fn expected_status(&self) -> u16 {
        success_status(&self.method(), matches!(self, ApiRequest::Login(_)))
    }

    /// Whether the body may carry secrets and must stay out of logs.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, ApiRequest::Signup(_) | ApiRequest::Login(_))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn test_delete_exam_routes_to_exam_path_and_expects_204() {
        let request = ApiRequest::DeleteExam { exam_id: 7 };
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(request.path(), "/exams/7");
        assert_eq!(request.expected_status(), 204);
        assert_eq!(request.body().unwrap(), None);
    }

    #[test]
    fn test_create_section_body_and_status() {
        let request = ApiRequest::CreateSection {
            exam_id: 3,
            section: Section {
                section: "Algebra".into(),
                no_of_questions: 10,
                marks_per_question: 2,
                total_marks: 20,
            },
        };
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.path(), "/exams/3/sections");
        assert_eq!(request.expected_status(), 201);
        assert_eq!(
            request.body().unwrap(),
            Some(json!({
                "section": "Algebra",
                "no_of_questions": 10,
                "marks_per_question": 2,
                "total_marks": 20
            }))
        );
    }

    #[test]
    fn test_login_is_post_expecting_200() {
        let request = ApiRequest::Login(Credentials {
            email: "a@b.c".into(),
            password: "secret1".into(),
        });
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.expected_status(), 200);
        assert!(request.is_sensitive());
    }

    #[test]
    fn test_routes_match_action_table() {
        let cases = [
            (ApiRequest::ListExams, "GET", "/exams", 200),
            (ApiRequest::GetExam { exam_id: 1 }, "GET", "/exams/1", 200),
            (
                ApiRequest::ListSections { exam_id: 2 },
                "GET",
                "/exams/2/sections",
                200,
            ),
            (
                ApiRequest::DeleteSection { section_id: 4 },
                "DELETE",
                "/sections/4",
                204,
            ),
            (
                ApiRequest::GetSyllabus { section_id: 5 },
                "GET",
                "/sections/5/syllabus",
                200,
            ),
            (
                ApiRequest::DeleteTopic { syllabus_id: 6 },
                "DELETE",
                "/syllabus/6",
                204,
            ),
            (
                ApiRequest::ListNotes { exam_id: 8 },
                "GET",
                "/exams/8/notes",
                200,
            ),
            (
                ApiRequest::UpdateNote {
                    note_id: 9,
                    note: Note { note: "x".into() },
                },
                "PUT",
                "/notes/9",
                200,
            ),
            (
                ApiRequest::QuestionsByTopic { syllabus_id: 10 },
                "GET",
                "/syllabus/10/questions",
                200,
            ),
            (
                ApiRequest::UpdateQuestion {
                    question_id: 11,
                    update: QuestionUpdate {
                        solution: "y".into(),
                    },
                },
                "PUT",
                "/questions/11",
                200,
            ),
            (
                ApiRequest::ExamOverview { exam_id: 12 },
                "GET",
                "/exams/12/overview",
                200,
            ),
            (
                ApiRequest::ExamAnalytics { exam_id: 13 },
                "GET",
                "/analytics/exam/13",
                200,
            ),
        ];

        for (request, method, path, status) in cases {
            assert_eq!(request.method().as_str(), method, "{request:?}");
            assert_eq!(request.path(), path, "{request:?}");
            assert_eq!(request.expected_status(), status, "{request:?}");
        }
    }

    #[test]
    fn test_list_questions_query_only_for_filters() {
        let request = ApiRequest::ListQuestions(QuestionFilter {
            syllabus_id: None,
            difficulty: Some(Difficulty::Easy),
        });
        assert_eq!(
            request.query(),
            vec![("difficulty".to_string(), "easy".to_string())]
        );
        assert!(ApiRequest::ListExams.query().is_empty());
    }
}
