//! Test doubles for the request layer and the error notifier

use super::error_notifier::ErrorSink;
use super::request_client::{ApiError, ApiRequest, ApiResponse, Transport};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

pub fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        status_text: String::new(),
        body: body.to_string(),
    }
}

/// Replays a fixed script of outcomes, one per attempt.
/// An exhausted script behaves like an unreachable network.
pub struct ScriptedTransport {
    script: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: RefCell<Vec<ApiRequest>>,
    pauses: RefCell<Vec<u32>>,
    attempts: Cell<usize>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<ApiResponse, ApiError>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            requests: RefCell::new(Vec::new()),
            pauses: RefCell::new(Vec::new()),
            attempts: Cell::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }

    pub fn pauses(&self) -> Vec<u32> {
        self.pauses.borrow().clone()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.attempts.set(self.attempts.get() + 1);
        self.requests.borrow_mut().push(request.clone());
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("network unreachable".into())))
    }

    async fn pause(&self, ms: u32) {
        self.pauses.borrow_mut().push(ms);
    }
}

/// Remembers every message shown
#[derive(Default)]
pub struct RecordingSink {
    shown: RefCell<Vec<(String, u32)>>,
    hidden: Cell<usize>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.shown.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn durations(&self) -> Vec<u32> {
        self.shown.borrow().iter().map(|(_, d)| *d).collect()
    }

    pub fn hidden(&self) -> usize {
        self.hidden.get()
    }
}

impl ErrorSink for RecordingSink {
    fn show_error(&self, message: &str, duration_ms: u32) {
        self.shown
            .borrow_mut()
            .push((message.to_string(), duration_ms));
    }

    fn hide_error(&self) {
        self.hidden.set(self.hidden.get() + 1);
    }
}
