//! HTTP client for the Olympiad Prep backend.
//!
//! Every call issues exactly one request. HTTP error statuses come back as
//! `Ok(ApiResponse)`; only failures to reach the server are `Err`.

mod request;

use std::fmt;
use std::time::Instant;

pub use request::ApiRequest;
pub(crate) use request::success_status;
use serde_json::Value;
use url::Url;

use crate::config::Config;

/// Status and parsed body of a response that reached the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `Value::Null` when the body is empty or not JSON.
    pub json: Value,
}

impl ApiResponse {
    pub fn is_success_for(&self, request: &ApiRequest) -> bool {
        self.status == request.expected_status()
    }
}

/// Why a request produced no response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection, DNS, TLS or timeout failure, with the underlying cause.
    Transport(String),
    /// The configured base URL is not an absolute http(s) URL.
    InvalidBaseUrl(String),
    /// The request body could not be encoded.
    Encode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(cause) => write!(f, "could not reach the server: {cause}"),
            ApiError::InvalidBaseUrl(url) => write!(f, "invalid base URL: {url}"),
            ApiError::Encode(cause) => write!(f, "failed to encode request body: {cause}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Thin wrapper over `reqwest::Client` bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = config.effective_base_url().to_string();
        validate_base_url(&base_url)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("olympiad/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a request, including its query string.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, request.path());
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidBaseUrl(format!("{raw}: {e}")))?;
        let query = request.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub async fn call(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method();
        let url = self.url_for(request)?;
        let body = request
            .body()
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        if request.is_sensitive() {
            tracing::debug!(%method, path = url.path(), "sending request");
        } else {
            tracing::debug!(%method, %url, body = ?body, "sending request");
        }

        let started = Instant::now();
        let mut builder = self.http.request(method.clone(), url.clone());
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, path = url.path(), error = %e, "request failed");
                return Err(ApiError::Transport(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(%method, path = url.path(), status, error = %e, "failed to read body");
                return Err(ApiError::Transport(e.to_string()));
            }
        };

        tracing::debug!(
            %method,
            path = url.path(),
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        Ok(ApiResponse {
            status,
            json: body_to_json(&bytes),
        })
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ApiError> {
    let url =
        Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(())
}

/// Empty or non-JSON bodies (a 204, an HTML error page) become `Null`.
fn body_to_json(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{Difficulty, QuestionFilter};

    fn client(base_url: &str) -> ApiClient {
        let config = Config {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        for bad in ["not a url", "ftp://example.com", "mailto:someone@example.com"] {
            let config = Config {
                base_url: bad.to_string(),
                ..Default::default()
            };
            assert!(
                matches!(ApiClient::new(&config), Err(ApiError::InvalidBaseUrl(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_url_for_joins_base_path_and_query() {
        let api = client("http://localhost:8000/api/");
        assert_eq!(api.base_url(), "http://localhost:8000/api");

        let url = api
            .url_for(&ApiRequest::ListQuestions(QuestionFilter {
                syllabus_id: Some(1),
                difficulty: Some(Difficulty::Medium),
            }))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/questions?syllabus_id=1&difficulty=medium"
        );

        let url = api.url_for(&ApiRequest::ListExams).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/exams");
    }

    #[test]
    fn test_body_to_json_tolerates_empty_and_non_json() {
        assert_eq!(body_to_json(b""), Value::Null);
        assert_eq!(body_to_json(b" \n"), Value::Null);
        assert_eq!(body_to_json(b"<html>"), Value::Null);
        assert_eq!(body_to_json(b"[1,2]"), json!([1, 2]));
    }

    #[test]
    fn test_transport_error_display_names_cause() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "could not reach the server: connection refused");
    }
}
