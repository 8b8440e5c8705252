use crate::domain::a001_vehicle_report::ui::SectionContent;
use crate::domain::a001_vehicle_report::ReportStore;
use crate::domain::a002_assistant::bridge::MODAL_GREETING;
use crate::domain::a002_assistant::ui::ChatPanel;
use crate::domain::a002_assistant::{AssistantBridge, ChatTarget, ReportSession};
use crate::shared::api_utils::{api_base, current_vehicle_id};
use crate::shared::config::{DEBOUNCE_DELAY_MS, ERROR_DISPLAY_MS};
use crate::shared::debounce::debounce_keyed;
use crate::shared::error_notifier::{ErrorBannerView, ErrorNotifier, ErrorSink};
use crate::shared::http::GlooTransport;
use crate::shared::request_client::RequestClient;
use contracts::domain::a002_assistant::ChatEntry;
use contracts::projections::p001_report_sections::{SectionId, SectionView};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

const LOADING_REPORT_MESSAGE: &str = "Loading report...";

fn request_client() -> RequestClient<GlooTransport> {
    RequestClient::new(GlooTransport::new(), api_base())
}

fn assistant(notifier: ErrorNotifier) -> AssistantBridge<GlooTransport, ErrorNotifier> {
    AssistantBridge::new(request_client(), notifier)
}

#[component]
#[allow(non_snake_case)]
pub fn App() -> impl IntoView {
    let notifier = ErrorNotifier::new();

    let store = RwSignal::new(ReportStore::new());
    let session = RwSignal::new(ReportSession::new());
    let open_view = RwSignal::new(None::<SectionView>);
    let modal_messages = RwSignal::new(Vec::<ChatEntry>::new());
    let main_draft = RwSignal::new(String::new());
    let modal_draft = RwSignal::new(String::new());

    // История основного чата хранится только в сессии
    let main_messages = Signal::derive(move || session.with(|s| s.chat_history().to_vec()));
    let loading_message =
        Signal::derive(move || session.with(|s| s.loading_message().map(str::to_string)));
    let is_typing = Signal::derive(move || session.with(ReportSession::is_typing));

    // Загрузка отчёта при монтировании
    Effect::new(move |_| {
        let vehicle_id = current_vehicle_id();
        session.update(|s| s.begin_loading(LOADING_REPORT_MESSAGE));
        spawn_local(async move {
            match ReportStore::fetch(&request_client(), &vehicle_id).await {
                Ok(data) => store.update(|s| s.replace(vehicle_id, data)),
                Err(e) => notifier.handle_api_error(&e.source),
            }
            session.update(ReportSession::finish_loading);
        });
    });

    // Текст забирается из поля ввода только когда дебаунс сработал
    let send_turn = move |target: ChatTarget, _: ()| {
        let draft = match target {
            ChatTarget::Main => main_draft,
            ChatTarget::Modal => modal_draft,
        };
        let turn = store.with_untracked(|st| {
            session.with_untracked(|s| {
                draft
                    .try_update(|text| s.take_turn(st.data(), text, target))
                    .flatten()
            })
        });
        let Some(turn) = turn else {
            return;
        };

        if target == ChatTarget::Modal {
            modal_messages.update(|m| m.push(ChatEntry::user(turn.message.clone())));
        }
        session.update(|s| {
            s.record_question(&turn);
            s.begin_reply();
        });

        spawn_local(async move {
            let reply = assistant(notifier).reply(&turn).await;
            if turn.target == ChatTarget::Modal {
                modal_messages.update(|m| m.push(ChatEntry::assistant(reply.clone())));
            }
            session.update(|s| {
                s.finish_reply();
                s.record_reply(&turn, &reply);
            });
        });
    };
    let debounced_send = StoredValue::new_local(debounce_keyed(DEBOUNCE_DELAY_MS, send_turn));

    let on_send_main = Callback::new(move |_: ()| {
        debounced_send.with_value(|send| send(ChatTarget::Main, ()));
    });
    let on_send_modal = Callback::new(move |_: ()| {
        debounced_send.with_value(|send| send(ChatTarget::Modal, ()));
    });

    let open_section = move |section: SectionId| {
        let opened = store.with_untracked(|st| {
            session
                .try_update(|s| s.open_section(st.data(), section.key()))
                .flatten()
        });
        match opened {
            Some(view) => {
                modal_messages.set(vec![ChatEntry::assistant(MODAL_GREETING)]);
                open_view.set(Some(view));
            }
            None => notifier.show_error("Section data not found", ERROR_DISPLAY_MS),
        }
    };

    let close_section = move || {
        session.update(ReportSession::close_section);
        open_view.set(None);
    };

    view! {
        <div class="report-app">
            <ErrorBannerView notifier=notifier />

            <header class="report-header">
                <h1>
                    {move || {
                        let name = store.with(|s| s.vehicle_info().display_name());
                        if name.is_empty() { "Vehicle Inspection Report".to_string() } else { name }
                    }}
                </h1>
                <dl class="report-header__summary">
                    {move || {
                        store
                            .with(|s| {
                                s.vehicle_info()
                                    .summary_fields()
                                    .into_iter()
                                    .map(|(label, value)| (label, value.to_string()))
                                    .collect::<Vec<_>>()
                            })
                            .into_iter()
                            .map(|(label, value)| {
                                view! {
                                    <div class="report-header__field">
                                        <dt>{label}</dt>
                                        <dd>{value}</dd>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </dl>
            </header>

            {move || {
                loading_message
                    .get()
                    .map(|message| {
                        view! {
                            <div class="loading-indicator">
                                <Spinner />
                                <span>{message}</span>
                            </div>
                        }
                    })
            }}

            <nav class="section-list">
                {SectionId::all()
                    .into_iter()
                    .map(|section| {
                        let count = move || {
                            store.with(|s| s.section(section.key()).map(|v| v.item_count()))
                        };
                        view! {
                            <button
                                class="section-card"
                                data-section=section.key()
                                on:click=move |_| open_section(section)
                            >
                                <span class="section-card__title">{section.title()}</span>
                                {move || {
                                    count()
                                        .filter(|n| *n > 0)
                                        .map(|n| view! { <span class="section-card__count">{n}</span> })
                                }}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <section class="chat-section">
                <h2>"Ask about this report"</h2>
                <ChatPanel
                    messages=main_messages
                    is_sending=is_typing
                    draft=main_draft
                    on_send=on_send_main
                />
            </section>

            {move || {
                open_view
                    .get()
                    .map(|view| {
                        let title = view.title.clone();
                        view! {
                            <div class="modal-overlay active">
                                <div class="modal" role="dialog" aria-modal="true">
                                    <div class="modal-header">
                                        <h2>{title}</h2>
                                        <Button
                                            appearance=ButtonAppearance::Secondary
                                            on_click=move |_| close_section()
                                        >
                                            "Close"
                                        </Button>
                                    </div>
                                    <SectionContent section=view />
                                    <ChatPanel
                                        messages=modal_messages
                                        is_sending=is_typing
                                        draft=modal_draft
                                        on_send=on_send_modal
                                        placeholder="Ask about this section..."
                                    />
                                </div>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
