use serde::{Deserialize, Serialize};

use crate::models::{ChatMessage, ChatRequest, ChatRole};

/// How many prior messages travel with each request.
pub const HISTORY_LIMIT: usize = 10;

pub const WELCOME_MESSAGE: &str = "Assalam o Alaikum! 👋 Main Farooq Pharmacy ka assistant hoon. \
                                   Aapko kaunsi medicine chahiye? Hum se khareedein, best prices milenge!";

/// Shown in place of a reply when the request fails for any reason.
pub const FALLBACK_REPLY: &str =
    "Maaf kijiye, kuch problem ho gayi. Please 03310076524 pe call karein!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Closed,
    Open,
    AwaitingReply,
}

/// Client-side chat widget state. Messages live only as long as the page.
///
/// At most one request is outstanding, so replies are appended in
/// submission order.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    visible: bool,
    in_flight: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> ChatPhase {
        if !self.visible {
            ChatPhase::Closed
        } else if self.in_flight {
            ChatPhase::AwaitingReply
        } else {
            ChatPhase::Open
        }
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.in_flight
    }

    /// Opens the widget, seeding the welcome message on first open.
    pub fn open(&mut self) {
        self.visible = true;
        if self.messages.is_empty() {
            self.messages.push(ChatMessage::assistant(WELCOME_MESSAGE));
        }
    }

    /// Hides the widget. An outstanding request still resolves into the log.
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        if self.visible {
            self.close();
        } else {
            self.open();
        }
    }

    /// Records the user's turn and returns the request to send, or `None`
    /// when the widget is closed, a reply is pending, or the input is blank.
    pub fn begin_submit(&mut self, input: &str) -> Option<ChatRequest> {
        if !self.visible || self.in_flight {
            return None;
        }
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        let history = recent(&self.messages).to_vec();
        self.messages.push(ChatMessage::user(message));
        self.in_flight = true;

        Some(ChatRequest { message: message.to_string(), history })
    }

    /// Appends the reply, or [`FALLBACK_REPLY`] on error, and re-enables
    /// submission. Returns `false` if no request was pending.
    pub fn resolve<E>(&mut self, outcome: Result<String, E>) -> bool {
        if !self.in_flight {
            return false;
        }
        let content = outcome.unwrap_or_else(|_| FALLBACK_REPLY.to_string());
        self.messages.push(ChatMessage::assistant(content));
        self.in_flight = false;
        true
    }
}

fn recent(messages: &[ChatMessage]) -> &[ChatMessage] {
    &messages[messages.len().saturating_sub(HISTORY_LIMIT)..]
}

/// Role on the completion wire, where the system turn is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    System,
    User,
    Assistant,
}

impl From<ChatRole> for WireRole {
    fn from(role: ChatRole) -> Self {
        match role {
            ChatRole::User => WireRole::User,
            ChatRole::Assistant => WireRole::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: WireRole,
    pub content: String,
}

/// `[system] + last HISTORY_LIMIT of history + [user]`.
pub fn assemble_messages(
    system_prompt: &str,
    history: &[ChatMessage],
    user_message: &str,
) -> Vec<WireMessage> {
    let history = recent(history);
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(WireMessage { role: WireRole::System, content: system_prompt.to_string() });
    messages.extend(history.iter().map(|m| WireMessage {
        role: m.role.into(),
        content: m.content.clone(),
    }));
    messages.push(WireMessage { role: WireRole::User, content: user_message.to_string() });
    messages
}
