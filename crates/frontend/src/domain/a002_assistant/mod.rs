pub mod bridge;
pub mod session;
pub mod ui;

pub use bridge::AssistantBridge;
pub use session::{ChatTarget, ChatTurn, ReportSession};
