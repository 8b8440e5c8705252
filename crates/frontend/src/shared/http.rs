//! Browser transport over `fetch` (gloo-net)

use super::config::REQUEST_TIMEOUT_MS;
use super::request_client::{ApiError, ApiRequest, ApiResponse, HttpMethod, Transport};
use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use web_sys::AbortController;

/// Each attempt is aborted after `timeout_ms`; an aborted attempt reports
/// `ApiError::Timeout` so the retry loop treats it like a network failure.
#[derive(Debug, Clone, Copy)]
pub struct GlooTransport {
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new() -> Self {
        Self {
            timeout_ms: REQUEST_TIMEOUT_MS,
        }
    }

    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl Default for GlooTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let controller = AbortController::new()
            .map_err(|e| ApiError::Transport(format!("AbortController: {:?}", e)))?;
        let signal = controller.signal();

        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        }
        .abort_signal(Some(&signal));

        let prepared = match &request.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body.clone()),
            None => builder.build(),
        }
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let timed_out = Rc::new(Cell::new(false));
        // dropped at the end of the attempt, which cancels the timer
        let _deadline = {
            let timed_out = Rc::clone(&timed_out);
            let controller = controller.clone();
            Timeout::new(self.timeout_ms, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let timeout_ms = self.timeout_ms;
        let fail = |e: gloo_net::Error| {
            if timed_out.get() {
                ApiError::Timeout { timeout_ms }
            } else {
                ApiError::Transport(e.to_string())
            }
        };

        let response = prepared.send().await.map_err(fail)?;
        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.map_err(fail)?;

        Ok(ApiResponse {
            status,
            status_text,
            body,
        })
    }

    async fn pause(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}
