mod agent;
mod config;
mod db;
mod errors;
mod models;
mod routes;
mod service;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::GroqAgentService;
use crate::config::AppConfig;
use crate::db::PgCatalogRepository;
use crate::routes::{router, AppState};
use crate::service::catalog_service::CatalogService;
use crate::service::chat_service::ChatService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pharmacy_storefront=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    // ── Catalog store ─────────────────────────────────────────────────────────
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    info!("Database connection established and migrations applied");

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let catalog = CatalogService::new(Arc::new(PgCatalogRepository::new(pool)), config.catalog_ttl);
    let agent = GroqAgentService::new(
        &config.completion_api_key,
        &config.completion_base_url,
        &config.completion_model,
    )?;
    let chat = ChatService::new(catalog.clone(), Arc::new(agent));

    let cors = match &config.cors_allow_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>().context("Invalid CORS_ALLOW_ORIGIN")?),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    // ── Router ────────────────────────────────────────────────────────────────
    let app = router(AppState { catalog, chat })
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
