//! Transient error banner
//!
//! One banner for the whole app. Showing a new message while one is visible
//! replaces it and restarts the dismiss timer; messages never queue.

use super::config::ERROR_DISPLAY_MS;
use super::request_client::ApiError;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Куда сообщать об ошибках
pub trait ErrorSink {
    fn show_error(&self, message: &str, duration_ms: u32);

    fn hide_error(&self);

    /// Show the user-facing text for an API error with the default duration
    fn handle_api_error(&self, error: &ApiError) {
        self.show_error(error.user_message(), ERROR_DISPLAY_MS);
    }
}

/// Banner state. Every `show` hands out a token; `expire` with a stale token
/// is ignored, which is what makes a newer message restart the timer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBanner {
    message: Option<String>,
    generation: u64,
}

impl ErrorBanner {
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some(message.into());
        self.generation
    }

    pub fn hide(&mut self) {
        self.message = None;
    }

    /// Hide if `token` belongs to the message currently shown
    pub fn expire(&mut self, token: u64) -> bool {
        if token == self.generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

/// Signal-backed sink used by the app
#[derive(Clone, Copy)]
pub struct ErrorNotifier {
    banner: RwSignal<ErrorBanner>,
}

impl ErrorNotifier {
    pub fn new() -> Self {
        Self {
            banner: RwSignal::new(ErrorBanner::default()),
        }
    }

    pub fn message(&self) -> Option<String> {
        self.banner.with(|b| b.message().map(str::to_string))
    }
}

impl Default for ErrorNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorSink for ErrorNotifier {
    fn show_error(&self, message: &str, duration_ms: u32) {
        log::error!("Application error: {}", message);

        let mut token = 0;
        self.banner.update(|b| token = b.show(message));

        let banner = self.banner;
        spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            banner.update(|b| {
                b.expire(token);
            });
        });
    }

    fn hide_error(&self) {
        self.banner.update(ErrorBanner::hide);
    }
}

#[component]
pub fn ErrorBannerView(notifier: ErrorNotifier) -> impl IntoView {
    view! {
        {move || notifier.message().map(|message| view! {
            <div class="error-boundary" role="alert">
                <span class="error-boundary__message">{message}</span>
                <button class="button button--icon" on:click=move |_| notifier.hide_error()>
                    "×"
                </button>
            </div>
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::RecordingSink;

    #[test]
    fn test_show_then_expire() {
        let mut banner = ErrorBanner::default();
        let token = banner.show("Oops");
        assert_eq!(banner.message(), Some("Oops"));
        assert!(banner.expire(token));
        assert!(!banner.is_visible());
    }

    #[test]
    fn test_new_message_resets_timer() {
        let mut banner = ErrorBanner::default();
        let first = banner.show("first");
        let second = banner.show("second");

        // the first timer fires while the second message is showing
        assert!(!banner.expire(first));
        assert_eq!(banner.message(), Some("second"));

        assert!(banner.expire(second));
        assert_eq!(banner.message(), None);
    }

    #[test]
    fn test_hide() {
        let mut banner = ErrorBanner::default();
        let token = banner.show("Oops");
        banner.hide();
        assert!(!banner.is_visible());
        assert!(!banner.expire(token));
    }

    #[test]
    fn test_handle_api_error_uses_mapped_message() {
        let sink = RecordingSink::default();
        sink.handle_api_error(&ApiError::Status {
            status: 404,
            message: "Report not found".into(),
        });
        assert_eq!(sink.messages(), vec!["The requested resource was not found."]);
        assert_eq!(sink.durations(), vec![5000]);
    }
}
