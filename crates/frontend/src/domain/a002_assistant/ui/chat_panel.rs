//! Chat transcript + input, shared by the page chat and the section modal
//!
//! The input text lives in the parent (`draft`); the parent clears it once the
//! message is actually sent.

use crate::domain::a002_assistant::bridge::TYPING_MESSAGE;
use contracts::domain::a002_assistant::{ChatEntry, ChatRole};
use leptos::prelude::*;
use thaw::*;

fn bubble_class(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "chat-message user",
        ChatRole::Assistant => "chat-message bot",
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ChatPanel(
    #[prop(into)] messages: Signal<Vec<ChatEntry>>,
    #[prop(into)] is_sending: Signal<bool>,
    draft: RwSignal<String>,
    on_send: Callback<()>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    let container_ref = NodeRef::<leptos::html::Div>::new();

    // Прокрутка к последнему сообщению
    Effect::new(move |_| {
        messages.track();
        if let Some(container) = container_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let handle_send = Callback::new(move |_: ()| {
        if draft.with_untracked(|text| text.trim().is_empty()) {
            return;
        }
        on_send.run(());
    });

    view! {
        <div class="chat-panel">
            <div class="chat-messages" node_ref=container_ref>
                <For
                    each=move || messages.get()
                    key=|entry| entry.id
                    let:entry
                >
                    <div class=bubble_class(entry.role)>{entry.content.clone()}</div>
                </For>
                <Show when=move || is_sending.get()>
                    <div class="chat-message bot typing">{TYPING_MESSAGE}</div>
                </Show>
            </div>

            <div class="chat-input">
                <Input
                    value=draft
                    placeholder=placeholder.unwrap_or("Ask about this report...")
                    disabled=is_sending
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            handle_send.run(());
                        }
                    }
                />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=is_sending
                    on_click=move |_| handle_send.run(())
                >
                    "Send"
                </Button>
            </div>
        </div>
    }
}
