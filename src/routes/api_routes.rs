use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use storefront_core::{ChatRequest, SearchResponse};
use tracing::{debug, error};

use crate::errors::AppError;
use crate::models::{ErrorBody, ProductPageResponse, ProductsQuery, SearchQuery};
use crate::routes::AppState;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET `/api/products?page=N`: one page of the catalog snapshot.
/// An unparseable `page` is treated as the first page.
pub async fn list_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ProductsQuery>, QueryRejection>,
) -> Json<ProductPageResponse> {
    let requested = match query {
        Ok(Query(query)) => query.page,
        Err(rejection) => {
            debug!("Bad page parameter, serving first page: {}", rejection.body_text());
            1
        }
    };
    let (page, snapshot_taken_at) = state.catalog.page(requested).await;
    Json(ProductPageResponse { page, snapshot_taken_at })
}

/// GET `/api/search?q=..&seq=N`: name search, echoing the caller's stamp
pub async fn search_handler(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return error_response(&AppError::MalformedRequest { reason: rejection.body_text() })
        }
    };
    let results = state.catalog.search(&query.q).await;
    Json(SearchResponse { seq: query.seq, results }).into_response()
}

/// GET `/api/settings/contact`: order and call numbers
pub async fn contact_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.contact().await)
}

/// POST `/api/chat`: one assistant reply for `{ message, history }`
pub async fn chat_handler(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            return error_response(&AppError::MalformedRequest { reason: rejection.body_text() })
        }
    };

    match state.chat.chat(request).await {
        Ok(reply) => Json(reply).into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/health`
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn error_response(err: &AppError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_completion_unavailable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        error!("Request failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(ErrorBody { error: err.to_string() })).into_response()
}
