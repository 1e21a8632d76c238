pub mod api_routes;

use axum::routing::{get, post};
use axum::Router;

use crate::service::catalog_service::CatalogService;
use crate::service::chat_service::ChatService;
use api_routes::{
    chat_handler, contact_handler, health_handler, list_products_handler, search_handler,
};

/// Everything a handler may touch. Passed explicitly through axum state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub chat: ChatService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/products", get(list_products_handler))
        .route("/api/search", get(search_handler))
        .route("/api/settings/contact", get(contact_handler))
        .route("/api/chat", post(chat_handler))
        .with_state(state)
}
