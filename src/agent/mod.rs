pub mod prompt;

use async_trait::async_trait;
use rig::completion::Chat;
use rig::message::Message as RigMessage;
use rig::prelude::CompletionClient;
use rig::providers::groq;
use storefront_core::conversation::{WireMessage, WireRole};
use tracing::error;

use crate::errors::AppError;

pub const TEMPERATURE: f64 = 0.8;
pub const MAX_TOKENS: u64 = 300;

/// One round-trip to a chat-completion service.
///
/// `messages` is the fully assembled list: system turn first, new user turn last.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[WireMessage]) -> Result<String, AppError>;
}

/// Splits the assembled list into rig's preamble / history / prompt triple.
fn split_for_rig(messages: &[WireMessage]) -> Result<(String, Vec<RigMessage>, String), AppError> {
    let (last, rest) = messages
        .split_last()
        .filter(|(last, _)| last.role == WireRole::User)
        .ok_or_else(|| AppError::Unexpected("conversation must end with a user turn".into()))?;

    let mut preamble = String::new();
    let mut history = Vec::with_capacity(rest.len());
    for m in rest {
        match m.role {
            WireRole::System => preamble.push_str(&m.content),
            WireRole::User => history.push(RigMessage::user(&m.content)),
            WireRole::Assistant => history.push(RigMessage::assistant(&m.content)),
        }
    }
    Ok((preamble, history, last.content.clone()))
}

/// Groq's OpenAI-compatible chat completions, reached through rig.
/// A fresh agent is built per request since the preamble carries live prices.
#[derive(Clone)]
pub struct GroqAgentService {
    client: groq::Client,
    base_url: String,
    model: String,
}

impl GroqAgentService {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Result<Self, AppError> {
        let client = groq::Client::builder()
            .api_key(api_key.to_string())
            .base_url(base_url)
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build Groq client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl CompletionBackend for GroqAgentService {
    async fn complete(&self, messages: &[WireMessage]) -> Result<String, AppError> {
        let (preamble, history, prompt) = split_for_rig(messages)?;

        let agent = self
            .client
            .agent(&self.model)
            .preamble(&preamble)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build();

        agent.chat(prompt.as_str(), history).await.map_err(|e| {
            error!("Completion request to {} failed: {e}", self.base_url);
            let msg = e.to_string();
            if msg.contains("Connection refused") || msg.contains("connect") {
                AppError::CompletionUnavailable { host: self.base_url.clone() }
            } else if msg.contains("model_not_found") {
                AppError::ModelNotFound { model_name: self.model.clone() }
            } else {
                AppError::CompletionFailed { message: msg }
            }
        })
    }
}
