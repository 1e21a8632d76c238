use std::time::Duration;

use anyhow::Context;

const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_COMPLETION_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CATALOG_TTL_SECS: u64 = 60;

/// Process configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub completion_api_key: String,
    pub completion_base_url: String,
    pub completion_model: String,
    pub port: u16,
    pub catalog_ttl: Duration,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .context("DATABASE_URL must be set (copy .env.example to .env)")?;
        let completion_api_key = lookup("GROQ_API_KEY").context("GROQ_API_KEY must be set")?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };
        let ttl_secs = match lookup("CATALOG_TTL_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("CATALOG_TTL_SECS is not a number: {raw}"))?,
            None => DEFAULT_CATALOG_TTL_SECS,
        };

        Ok(Self {
            database_url,
            completion_api_key,
            completion_base_url: lookup("COMPLETION_BASE_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.to_string()),
            completion_model: lookup("COMPLETION_MODEL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            port,
            catalog_ttl: Duration::from_secs(ttl_secs),
            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN").filter(|o| !o.is_empty()),
        })
    }
}
