use std::sync::Arc;

use storefront_core::conversation::{assemble_messages, HISTORY_LIMIT};
use storefront_core::{ChatReply, ChatRequest};
use tracing::{info, warn};
use uuid::Uuid;

use crate::agent::prompt::system_prompt;
use crate::agent::CompletionBackend;
use crate::errors::AppError;
use crate::service::catalog_service::CatalogService;

/// Per-message cap. Oversized input is rejected, never truncated.
const MAX_MESSAGE_LENGTH: usize = 2000;

/// Used when the completion comes back without any content.
pub const EMPTY_REPLY_FALLBACK: &str = "Maaf kijiye, kuch problem ho gayi. Dobara try karein!";

#[derive(Clone)]
pub struct ChatService {
    catalog: CatalogService,
    backend: Arc<dyn CompletionBackend>,
}

fn check_length(field_name: &str, text: &str) -> Result<(), AppError> {
    let actual_length = text.chars().count();
    if actual_length > MAX_MESSAGE_LENGTH {
        return Err(AppError::FieldTooLong {
            field_name: field_name.to_string(),
            max_length: MAX_MESSAGE_LENGTH,
            actual_length,
        });
    }
    Ok(())
}

impl ChatService {
    pub fn new(catalog: CatalogService, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { catalog, backend }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::EmptyField { field_name: "message".to_string() });
        }
        check_length("message", message)?;

        let skip = request.history.len().saturating_sub(HISTORY_LIMIT);
        let history = &request.history[skip..];
        for turn in history {
            check_length("history", &turn.content)?;
        }

        // ── Prompt from the shared catalog snapshot ───────────────────────────
        let request_id = Uuid::new_v4();
        let snapshot = self.catalog.snapshot().await;
        let system = system_prompt(&snapshot.products, &snapshot.contact.whatsapp_number);
        let messages = assemble_messages(&system, history, message);

        info!(
            "Chat request {request_id}: {} history turns, {} products in prompt",
            history.len(),
            snapshot.products.len()
        );

        // ── Completion ────────────────────────────────────────────────────────
        let reply = self.backend.complete(&messages).await?;
        if reply.trim().is_empty() {
            warn!("Chat request {request_id}: completion returned no content");
            return Ok(ChatReply { reply: EMPTY_REPLY_FALLBACK.to_string() });
        }

        Ok(ChatReply { reply })
    }
}
