use leptos::ev;
use leptos::prelude::*;
use storefront_core::{ChatPhase, ChatRole};

use crate::state::StorefrontState;

const QUICK_QUESTIONS: [&str; 3] = ["Kya medicines hain?", "Panadol hai?", "Order kaise karoon?"];

/// Floating assistant widget: toggle button plus the conversation panel.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let state = expect_context::<StorefrontState>();
    let is_open = move || state.chat.get().phase() != ChatPhase::Closed;

    view! {
        <div class="chat-widget">
            <button class="chat-toggle" on:click=move |_| state.toggle_chat()>
                {move || if is_open() { "Close" } else { "Chat with us" }}
            </button>
            <Show when=is_open>
                <div class="chat-panel">
                    <div class="chat-header">"Farooq Pharmacy Assistant"</div>
                    <div class="messages-container">
                        {move || {
                            state
                                .chat
                                .get()
                                .messages()
                                .iter()
                                .map(|m| view! { <MessageBubble role=m.role content=m.content.clone() /> })
                                .collect_view()
                        }}
                        <Show when=move || state.chat.get().is_awaiting_reply()>
                            <div class="message assistant typing">"..."</div>
                        </Show>
                    </div>
                    <QuickQuestions />
                    <ChatInput />
                </div>
            </Show>
        </div>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(role: ChatRole, content: String) -> impl IntoView {
    let css_class = match role {
        ChatRole::User => "message user",
        ChatRole::Assistant => "message assistant",
    };

    view! {
        <div class=css_class>
            <div>{content}</div>
        </div>
    }
}

/// Suggested openers, shown until the user has said anything.
#[component]
fn QuickQuestions() -> impl IntoView {
    let state = expect_context::<StorefrontState>();

    view! {
        <Show when=move || state.chat.get().messages().len() <= 1>
            <div class="quick-questions">
                {QUICK_QUESTIONS
                    .into_iter()
                    .map(|q| {
                        view! {
                            <button class="quick-question" on:click=move |_| state.send_message(q.to_string())>
                                {q}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </Show>
    }
}

/// Chat input with send button. Disabled while a reply is pending.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<StorefrontState>();
    let (input, set_input) = signal(String::new());

    let is_sending = move || state.chat.get().is_awaiting_reply();

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || is_sending() {
            return;
        }
        set_input.set(String::new());
        state.send_message(text);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="input-area">
            <input
                type="text"
                placeholder="Medicine ka naam likhein..."
                prop:value=input
                on:input=move |ev| set_input.set(event_target_value(&ev))
                on:keydown=on_keydown
                disabled=is_sending
            />
            <button
                class="send-btn"
                on:click=move |_| send()
                disabled=move || is_sending() || input.get().trim().is_empty()
            >
                "Send"
            </button>
        </div>
    }
}
