//! Assistant bridge
//!
//! Never fails towards the caller: every error turns into a fallback reply and
//! is reported through the [`ErrorSink`].

use super::session::{ChatTarget, ChatTurn, ReportSession};
use crate::shared::config::{AI_SUMMARY_PATH, EXPLANATION_PATH};
use crate::shared::error_notifier::ErrorSink;
use crate::shared::request_client::{ApiError, RequestClient, Transport};
use contracts::domain::a001_vehicle_report::ReportData;
use contracts::domain::a002_assistant::{
    AiSummaryRequest, AiSummaryResponse, ExplanationRequest, ExplanationResponse, SectionContext,
};

pub const CHAT_FALLBACK_MESSAGE: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";
pub const EXPLANATION_FALLBACK_MESSAGE: &str = "Explanation not available at this time.";
pub const MODAL_GREETING: &str =
    "Hi! I can help explain anything about this section of your report. What would you like to know?";
pub const TYPING_MESSAGE: &str = "Assistant is typing...";

pub struct AssistantBridge<T, S> {
    client: RequestClient<T>,
    sink: S,
}

impl<T: Transport, S: ErrorSink> AssistantBridge<T, S> {
    pub fn new(client: RequestClient<T>, sink: S) -> Self {
        Self { client, sink }
    }

    pub fn client(&self) -> &RequestClient<T> {
        &self.client
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Ask the assistant; `section` is sent as `sectionData` (or `null`)
    pub async fn generate_response(
        &self,
        prompt: &str,
        section: Option<SectionContext>,
    ) -> String {
        let request = AiSummaryRequest {
            prompt: prompt.to_string(),
            section_data: section,
        };

        match self
            .client
            .post_json::<_, AiSummaryResponse>(AI_SUMMARY_PATH, &request)
            .await
        {
            Ok(response) => response.reply,
            Err(e) => {
                log::error!("Assistant request failed: {}", e);
                self.sink.handle_api_error(&e);
                CHAT_FALLBACK_MESSAGE.to_string()
            }
        }
    }

    /// Short explanation of a vehicle part
    pub async fn explain_issue(&self, part: &str) -> String {
        let request = ExplanationRequest {
            part: part.to_string(),
        };

        let result = self
            .client
            .post_json::<_, ExplanationResponse>(EXPLANATION_PATH, &request)
            .await
            .and_then(|response| {
                if response.explanation.trim().is_empty() {
                    Err(ApiError::MalformedBody("empty explanation".into()))
                } else {
                    Ok(response.explanation)
                }
            });

        match result {
            Ok(explanation) => explanation,
            Err(e) => {
                log::error!("Explanation request for '{}' failed: {}", part, e);
                self.sink.handle_api_error(&e);
                EXPLANATION_FALLBACK_MESSAGE.to_string()
            }
        }
    }

    pub async fn reply(&self, turn: &ChatTurn) -> String {
        self.generate_response(&turn.message, turn.section.clone())
            .await
    }

    /// Full chat round trip for an owned session.
    /// `None` when the input was rejected and nothing was sent.
    pub async fn send_message(
        &self,
        session: &mut ReportSession,
        data: &ReportData,
        message: &str,
        target: ChatTarget,
    ) -> Option<String> {
        let turn = session.prepare_turn(data, message, target)?;

        session.record_question(&turn);
        session.begin_reply();
        let reply = self.reply(&turn).await;
        session.finish_reply();

        session.record_reply(&turn, &reply);
        Some(reply)
    }
}
