mod chat_panel;

pub use chat_panel::ChatPanel;
