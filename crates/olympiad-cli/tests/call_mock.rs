use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_call_get_all_exams_prints_body() {
    let mock_server = MockServer::start().await;
    let home = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/exams"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "exam": "IMO"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("olympiad")
        .env("OLYMPIAD_HOME", home.path())
        .env("OLYMPIAD_BASE_URL", mock_server.uri())
        .args(["call", "exams", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exam\": \"IMO\""));
}

#[tokio::test]
async fn test_call_create_section_sends_form_body() {
    let mock_server = MockServer::start().await;
    let home = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/exams/3/sections"))
        .and(body_json(json!({
            "section": "Algebra",
            "no_of_questions": 10,
            "marks_per_question": 4,
            "total_marks": 40
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("olympiad")
        .env("OLYMPIAD_HOME", home.path())
        .env("OLYMPIAD_BASE_URL", mock_server.uri())
        .args([
            "call",
            "sections",
            "create",
            "--id",
            "3",
            "-f",
            "section=Algebra",
            "-f",
            "no_of_questions=10",
            "-f",
            "marks_per_question=4",
            "-f",
            "total_marks=40",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Section created!"))
        .stdout(predicate::str::contains("\"id\": 12"));
}

#[tokio::test]
async fn test_call_login_wrong_password_fails() {
    let mock_server = MockServer::start().await;
    let home = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "bad"})))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("olympiad")
        .env("OLYMPIAD_HOME", home.path())
        .env("OLYMPIAD_BASE_URL", mock_server.uri())
        .args([
            "call",
            "auth",
            "login",
            "-f",
            "email=a@b.c",
            "-f",
            "password=wrong",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));
}

#[tokio::test]
async fn test_call_unexpected_status_reports_code() {
    let mock_server = MockServer::start().await;
    let home = tempdir().unwrap();

    Mock::given(method("DELETE"))
        .and(path("/notes/4"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("olympiad")
        .env("OLYMPIAD_HOME", home.path())
        .env("OLYMPIAD_BASE_URL", mock_server.uri())
        .args(["call", "notes", "delete", "--id", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: 404"));
}

#[tokio::test]
async fn test_call_list_questions_sends_only_given_filters() {
    let mock_server = MockServer::start().await;
    let home = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/questions"))
        .and(query_param("difficulty", "medium"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("olympiad")
        .env("OLYMPIAD_HOME", home.path())
        .env("OLYMPIAD_BASE_URL", mock_server.uri())
        .args(["call", "questions", "list", "-f", "difficulty=Medium"])
        .assert()
        .success();
}

#[tokio::test]
async fn test_call_validation_error_sends_nothing() {
    let mock_server = MockServer::start().await;
    let home = tempdir().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("olympiad")
        .env("OLYMPIAD_HOME", home.path())
        .env("OLYMPIAD_BASE_URL", mock_server.uri())
        .args(["call", "notes", "create", "--id", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Note is required"));
}

#[test]
fn test_call_rejects_unknown_field() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("olympiad")
        .env("OLYMPIAD_HOME", home.path())
        .env("OLYMPIAD_BASE_URL", "http://127.0.0.1:9")
        .args(["call", "exams", "get", "-f", "name=x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field: name"));
}

#[test]
fn test_call_unreachable_server() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("olympiad")
        .env("OLYMPIAD_HOME", home.path())
        .env("OLYMPIAD_BASE_URL", "http://127.0.0.1:9")
        .args(["call", "exams", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: could not reach the server",
        ));
}
