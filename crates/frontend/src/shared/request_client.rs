//! Request client with bounded retry
//!
//! Retry covers transport failures only (network error, timeout). A response
//! that arrived with a non-OK status is handed back unchanged; turning it into
//! an error is the caller's job (`RequestClient::get_json`/`post_json` do it).

use super::config::{MAX_ATTEMPTS, RETRY_DELAY_MS};
use async_trait::async_trait;
use contracts::shared::api_error::ApiErrorBody;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required. Please log in again.";
pub const ACCESS_DENIED_MESSAGE: &str =
    "Access denied. You don't have permission to perform this action.";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Ошибки обращения к API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u32 },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Transport-level failure: the only kind that is retried
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Сообщение для пользователя
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Transport(_) | ApiError::Timeout { .. } => NETWORK_ERROR_MESSAGE,
            ApiError::Status { status: 401, .. } => AUTH_REQUIRED_MESSAGE,
            ApiError::Status { status: 403, .. } => ACCESS_DENIED_MESSAGE,
            ApiError::Status { status: 404, .. } => NOT_FOUND_MESSAGE,
            ApiError::Status { status, .. } if *status >= 500 => SERVER_ERROR_MESSAGE,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON body, POST only
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post_json<B: Serialize>(url: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body),
        })
    }
}

/// A received HTTP response, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::MalformedBody(e.to_string()))
    }

    /// `Ok(self)` for 2xx, otherwise `ApiError::Status` with the `{ error }` text
    /// when the body carries one.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.ok() {
            return Ok(self);
        }
        let message = ApiErrorBody::parse_message(&self.body).unwrap_or(self.status_text);
        Err(ApiError::Status {
            status: self.status,
            message,
        })
    }
}

/// HTTP transport plus the timer used between attempts.
///
/// `send` resolves for any received status and rejects only when no response
/// arrived. Futures are `?Send`: everything runs on the browser event loop.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;

    async fn pause(&self, ms: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            delay_ms: RETRY_DELAY_MS,
        }
    }
}

/// Send `request`, retrying rejected attempts up to `max_attempts` times with a
/// fixed `delay_ms` pause in between. Rejects with the last error once attempts
/// are exhausted. Attempts run one after another, never concurrently.
pub async fn fetch_with_retry<T>(
    transport: &T,
    request: &ApiRequest,
    max_attempts: u32,
    delay_ms: u32,
) -> Result<ApiResponse, ApiError>
where
    T: Transport + ?Sized,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match transport.send(request).await {
            Ok(response) => return Ok(response),
            Err(err) if attempt < max_attempts => {
                log::warn!(
                    "Request to {} failed (attempt {} of {}): {}",
                    request.url,
                    attempt,
                    max_attempts,
                    err
                );
                transport.pause(delay_ms).await;
                attempt += 1;
            }
            Err(err) => {
                log::error!(
                    "Request to {} failed after {} attempts: {}",
                    request.url,
                    max_attempts,
                    err
                );
                return Err(err);
            }
        }
    }
}

/// Transport + retry policy + base URL
pub struct RequestClient<T> {
    transport: T,
    policy: RetryPolicy,
    base: String,
}

impl<T: Transport> RequestClient<T> {
    pub fn new(transport: T, base: impl Into<String>) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
            base: base.into(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Raw call under the client's retry policy
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        fetch_with_retry(
            &self.transport,
            request,
            self.policy.max_attempts,
            self.policy.delay_ms,
        )
        .await
    }

    /// GET `{base}{path_and_query}` and parse a JSON body
    pub async fn get_json<R: DeserializeOwned>(&self, path_and_query: &str) -> Result<R, ApiError> {
        let request = ApiRequest::get(self.url(path_and_query));
        self.send(&request).await?.error_for_status()?.json()
    }

    /// POST a JSON body to `{base}{path}` and parse a JSON reply
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::post_json(self.url(path), body)?;
        self.send(&request).await?.error_for_status()?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::api_base;
    use crate::shared::testing::{response, ScriptedTransport};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        reply: String,
    }

    #[tokio::test]
    async fn test_always_failing_transport_tries_exactly_max_attempts() {
        let transport = ScriptedTransport::new(vec![
            Err(ApiError::Transport("fail".into())),
            Err(ApiError::Transport("fail".into())),
            Err(ApiError::Transport("fail".into())),
            Err(ApiError::Transport("never reached".into())),
        ]);

        let result = fetch_with_retry(&transport, &ApiRequest::get("/url"), 3, 10).await;

        assert_eq!(result, Err(ApiError::Transport("fail".into())));
        assert_eq!(transport.attempts(), 3);
        assert_eq!(transport.pauses(), vec![10, 10]);
    }

    #[tokio::test]
    async fn test_recovers_on_second_attempt() {
        let transport = ScriptedTransport::new(vec![
            Err(ApiError::Transport("fail".into())),
            Ok(response(200, r#"{"ok":true}"#)),
        ]);

        let result = fetch_with_retry(&transport, &ApiRequest::get("/url"), 3, 10).await;

        assert_eq!(result.unwrap().status, 200);
        assert_eq!(transport.attempts(), 2);
        assert_eq!(transport.pauses(), vec![10]);
    }

    #[tokio::test]
    async fn test_non_ok_response_is_not_retried() {
        let transport = ScriptedTransport::new(vec![
            Ok(response(500, r#"{"error":"Internal Server Error"}"#)),
            Ok(response(200, "{}")),
        ]);

        let result = fetch_with_retry(&transport, &ApiRequest::get("/url"), 3, 10).await;

        assert_eq!(result.unwrap().status, 500);
        assert_eq!(transport.attempts(), 1);
        assert!(transport.pauses().is_empty());
    }

    #[tokio::test]
    async fn test_last_error_is_returned() {
        let transport = ScriptedTransport::new(vec![
            Err(ApiError::Transport("first".into())),
            Err(ApiError::Timeout { timeout_ms: 15_000 }),
        ]);

        let result = fetch_with_retry(&transport, &ApiRequest::get("/url"), 2, 0).await;

        assert_eq!(result, Err(ApiError::Timeout { timeout_ms: 15_000 }));
    }

    #[tokio::test]
    async fn test_zero_attempts_still_sends_once() {
        let transport = ScriptedTransport::new(vec![Err(ApiError::Transport("down".into()))]);

        let result = fetch_with_retry(&transport, &ApiRequest::get("/url"), 0, 10).await;

        assert!(result.is_err());
        assert_eq!(transport.attempts(), 1);
    }

    #[tokio::test]
    async fn test_default_policy() {
        let client = RequestClient::new(ScriptedTransport::new(Vec::new()), "/api");
        assert_eq!(
            client.policy(),
            RetryPolicy {
                max_attempts: 3,
                delay_ms: 300
            }
        );
        let result = client.send(&ApiRequest::get("/url")).await;
        assert!(result.is_err());
        assert_eq!(client.transport().attempts(), 3);
        assert_eq!(client.transport().pauses(), vec![300, 300]);
    }

    #[tokio::test]
    async fn test_post_json_parses_reply() {
        let client = RequestClient::new(
            ScriptedTransport::new(vec![Ok(response(200, r#"{"reply":"Hello"}"#))]),
            "/api",
        );

        let reply: Reply = client
            .post_json("/get-ai-summary", &serde_json::json!({ "prompt": "hi" }))
            .await
            .unwrap();

        assert_eq!(reply.reply, "Hello");
        let sent = client.transport().requests();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].url, "/api/get-ai-summary");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"prompt":"hi"}"#));
    }

    #[tokio::test]
    async fn test_status_error_uses_error_body() {
        let client = RequestClient::new(
            ScriptedTransport::new(vec![Ok(response(404, r#"{"error":"Report not found"}"#))]),
            "/api",
        );

        let result: Result<Reply, _> = client.get_json("/get-report?vin=x").await;

        assert_eq!(
            result,
            Err(ApiError::Status {
                status: 404,
                message: "Report not found".into()
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let client = RequestClient::new(
            ScriptedTransport::new(vec![Ok(response(200, "<html>oops</html>"))]),
            "/api",
        );

        let result: Result<Reply, _> = client.get_json("/x").await;

        assert!(matches!(result, Err(ApiError::MalformedBody(_))));
    }

    #[test]
    fn test_user_messages() {
        let status = |status: u16| ApiError::Status {
            status,
            message: String::new(),
        };
        assert_eq!(
            ApiError::Transport("fetch failed".into()).user_message(),
            NETWORK_ERROR_MESSAGE
        );
        assert_eq!(
            ApiError::Timeout { timeout_ms: 1 }.user_message(),
            NETWORK_ERROR_MESSAGE
        );
        assert_eq!(status(401).user_message(), AUTH_REQUIRED_MESSAGE);
        assert_eq!(status(403).user_message(), ACCESS_DENIED_MESSAGE);
        assert_eq!(status(404).user_message(), "The requested resource was not found.");
        assert_eq!(status(500).user_message(), SERVER_ERROR_MESSAGE);
        assert_eq!(status(503).user_message(), SERVER_ERROR_MESSAGE);
        assert_eq!(status(400).user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(
            ApiError::MalformedBody("eof".into()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_url_joins_api_base() {
        let client = RequestClient::new(ScriptedTransport::new(Vec::new()), api_base());
        assert_eq!(client.url("/get-report"), "/.netlify/functions/get-report");
        assert_eq!(
            client.url("/get-report?vin=abc"),
            "/.netlify/functions/get-report?vin=abc"
        );
    }

    #[test]
    fn test_error_for_status_falls_back_to_status_text() {
        let mut res = response(405, "Method Not Allowed");
        res.status_text = "Method Not Allowed".into();
        assert_eq!(
            res.error_for_status(),
            Err(ApiError::Status {
                status: 405,
                message: "Method Not Allowed".into()
            })
        );
    }
}
