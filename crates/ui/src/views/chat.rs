use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use services::ChatService;
use tracing::debug;

use crate::context::AppContext;
use crate::views::{ErrorPanel, LoadingSkeleton, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ChatMessageVm, ChatVm, map_chat_messages, usage_label};

const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Debug, PartialEq)]
struct ChatData {
    messages: Vec<ChatMessageVm>,
    usage_label: String,
    exhausted: bool,
}

type ChatResource = Resource<Result<ChatData, ViewError>>;

#[component]
pub fn ChatWidget() -> Element {
    let ctx = use_context::<AppContext>();
    let chat = ctx.chat();
    let now = ctx.now();
    let mut vm = use_signal(ChatVm::new);

    let chat_for_history = chat.clone();
    let resource = use_resource(move || {
        let chat = chat_for_history.clone();
        async move {
            let history = chat.history().await.map_err(ViewError::from)?;
            Ok(ChatData {
                messages: map_chat_messages(&history, now),
                usage_label: usage_label(&history.usage),
                exhausted: history.usage.is_exhausted(),
            })
        }
    });

    let state = view_state_from_resource(&resource);
    let exhausted = matches!(&state, ViewState::Ready(data) if data.exhausted);
    let sending = vm.read().is_sending();
    let send_disabled = exhausted || !vm.read().can_send();
    let draft = vm.read().draft().to_string();
    let notice = vm.read().notice().cloned();

    let chat_for_click = chat.clone();
    let chat_for_key = chat;

    rsx! {
        section { class: "widget widget-chat",
            h3 { class: "widget-title", "AI Tutor" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingSkeleton { rows: 3 }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel {
                        message: err.message().to_string(),
                        on_retry: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(data) => rsx! {
                    p { class: "chat-usage", "{data.usage_label}" }
                    if data.messages.is_empty() {
                        p { class: "widget-empty", "Ask the tutor anything about your courses." }
                    } else {
                        div { class: "chat-log",
                            for message in data.messages {
                                ChatBubble { key: "{message.id}", message }
                            }
                        }
                    }
                    if data.exhausted {
                        p { class: "chat-limit", "You have used all your prompts for now." }
                    }
                },
            }

            if let Some(notice) = notice {
                div { class: "toast toast-error", role: "status",
                    span { "{notice.message}" }
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| vm.write().dismiss(),
                        "Dismiss"
                    }
                }
            }

            div { class: "chat-composer",
                textarea {
                    class: "chat-input",
                    placeholder: "Type your question...",
                    value: "{draft}",
                    disabled: sending,
                    oninput: move |evt| vm.write().set_draft(evt.value()),
                    onkeydown: move |evt| {
                        if evt.data.key() == Key::Enter && !evt.data.modifiers().contains(Modifiers::SHIFT) {
                            evt.prevent_default();
                            if !exhausted {
                                submit(vm, chat_for_key.clone(), resource);
                            }
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: send_disabled,
                    onclick: move |_| submit(vm, chat_for_click.clone(), resource),
                    if sending { "Sending..." } else { "Send" }
                }
            }
        }
    }
}

fn submit(mut vm: Signal<ChatVm>, chat: Arc<ChatService>, resource: ChatResource) {
    let Some(prompt) = vm.write().begin_send() else {
        return;
    };
    spawn(async move {
        match chat.send_message(&prompt).await {
            Ok(_) => {
                vm.write().finish_ok();
                let mut resource = resource;
                resource.restart();
            }
            Err(err) => {
                debug!(error = %err, "chat send surfaced to user");
                let generation = vm.write().finish_err(err.to_string());
                spawn(async move {
                    tokio::time::sleep(NOTICE_TTL).await;
                    vm.write().expire_notice(generation);
                });
            }
        }
    });
}

#[component]
fn ChatBubble(message: ChatMessageVm) -> Element {
    let class = if message.from_user {
        "chat-bubble chat-bubble-user"
    } else {
        "chat-bubble chat-bubble-assistant"
    };

    rsx! {
        div { class,
            if let Some(html) = message.html.clone() {
                div { class: "chat-markdown", dangerous_inner_html: "{html}" }
            } else {
                p { "{message.text}" }
            }
            if let Some(label) = message.time_label.clone() {
                span { class: "chat-time", "{label}" }
            }
        }
    }
}
