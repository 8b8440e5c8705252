use serde::{Deserialize, Serialize};

/// Контекст текущего раздела, передаваемый ассистенту
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionContext {
    pub title: String,
    pub content: String,
}

/// POST `get-ai-summary`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSummaryRequest {
    pub prompt: String,
    /// Serialized as `null` when the question is not tied to a section
    pub section_data: Option<SectionContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSummaryResponse {
    pub reply: String,
}

/// POST `get-explanation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationRequest {
    pub part: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationResponse {
    pub explanation: String,
}
