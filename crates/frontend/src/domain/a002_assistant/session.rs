//! Per-page session state: open section, main chat history, report loading
//! message and in-flight assistant replies

use contracts::domain::a001_vehicle_report::ReportData;
use contracts::domain::a002_assistant::{ChatEntry, SectionContext};
use contracts::projections::p001_report_sections::{build, build_section, SectionId, SectionView};

/// Which chat a message was typed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatTarget {
    /// Report-wide chat on the page; keeps history
    Main,
    /// Chat inside the section modal; sends the section as context
    Modal,
}

/// A validated message ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub target: ChatTarget,
    pub message: String,
    pub section: Option<SectionContext>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSession {
    current_section: Option<SectionId>,
    chat_history: Vec<ChatEntry>,
    loading: Option<String>,
    pending_replies: usize,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a section. An unknown key changes nothing and returns `None`.
    pub fn open_section(&mut self, data: &ReportData, key: &str) -> Option<SectionView> {
        let Some(view) = build_section(data, key) else {
            log::warn!("Section not found: {}", key);
            return None;
        };
        self.current_section = Some(view.section);
        Some(view)
    }

    pub fn close_section(&mut self) {
        self.current_section = None;
    }

    pub fn current_section(&self) -> Option<SectionId> {
        self.current_section
    }

    /// `{ title, content }` of the open section, rebuilt from `data`
    pub fn section_context(&self, data: &ReportData) -> Option<SectionContext> {
        self.current_section
            .map(|section| build(data, section).to_context())
    }

    pub fn chat_history(&self) -> &[ChatEntry] {
        &self.chat_history
    }

    pub fn begin_loading(&mut self, message: impl Into<String>) {
        self.loading = Some(message.into());
    }

    pub fn finish_loading(&mut self) {
        self.loading = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn loading_message(&self) -> Option<&str> {
        self.loading.as_deref()
    }

    /// Ответ ассистента в пути; не трогает сообщение о загрузке отчёта
    pub fn begin_reply(&mut self) {
        self.pending_replies += 1;
    }

    pub fn finish_reply(&mut self) {
        self.pending_replies = self.pending_replies.saturating_sub(1);
    }

    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    /// Trim and validate input. Blank input gives `None`; so does a modal
    /// message with no section open.
    pub fn prepare_turn(
        &self,
        data: &ReportData,
        message: &str,
        target: ChatTarget,
    ) -> Option<ChatTurn> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let section = match target {
            ChatTarget::Main => None,
            ChatTarget::Modal => {
                let Some(context) = self.section_context(data) else {
                    log::warn!("Modal chat message without an open section");
                    return None;
                };
                Some(context)
            }
        };

        Some(ChatTurn {
            target,
            message: message.to_string(),
            section,
        })
    }

    /// [`prepare_turn`](Self::prepare_turn) over an input box. The box is
    /// cleared only when a turn comes out; otherwise the text stays.
    pub fn take_turn(
        &self,
        data: &ReportData,
        draft: &mut String,
        target: ChatTarget,
    ) -> Option<ChatTurn> {
        let turn = self.prepare_turn(data, draft, target)?;
        draft.clear();
        Some(turn)
    }

    /// Only the main chat is remembered. The question goes in when it is
    /// sent, the reply when it arrives.
    pub fn record_question(&mut self, turn: &ChatTurn) {
        if turn.target == ChatTarget::Main {
            self.chat_history.push(ChatEntry::user(turn.message.clone()));
        }
    }

    pub fn record_reply(&mut self, turn: &ChatTurn, reply: &str) {
        if turn.target == ChatTarget::Main {
            self.chat_history.push(ChatEntry::assistant(reply));
        }
    }

    pub fn record_turn(&mut self, turn: &ChatTurn, reply: &str) {
        self.record_question(turn);
        self.record_reply(turn, reply);
    }
}
