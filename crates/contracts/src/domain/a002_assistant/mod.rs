pub mod aggregate;
pub mod dto;

pub use aggregate::{ChatEntry, ChatRole};
pub use dto::{
    AiSummaryRequest, AiSummaryResponse, ExplanationRequest, ExplanationResponse, SectionContext,
};
