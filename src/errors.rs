use thiserror::Error;

/// Top-level application error.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Catalog store errors ─────────────────────────────────────────────────
    #[error("Database query failed: {message}")]
    DatabaseQueryFailed {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Catalog index unavailable: {reason}")]
    IndexUnavailable { reason: String },

    // ── Completion API errors ────────────────────────────────────────────────
    #[error("Completion service unavailable at {host}")]
    CompletionUnavailable { host: String },

    #[error("Model '{model_name}' not found at the completion service")]
    ModelNotFound { model_name: String },

    #[error("Completion failed: {message}")]
    CompletionFailed { message: String },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Malformed request: {reason}")]
    MalformedRequest { reason: String },

    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn db_query(message: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::DatabaseQueryFailed { message: message.into(), source }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::MalformedRequest { .. }
                | AppError::EmptyField { .. }
                | AppError::FieldTooLong { .. }
        )
    }

    pub fn is_completion_unavailable(&self) -> bool {
        matches!(self, AppError::CompletionUnavailable { .. })
    }
}
