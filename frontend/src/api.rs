use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use storefront_core::{ChatReply, ChatRequest, ContactSettings, Page, Product, SearchResponse};

/// Base URL of the backend API server.
const API_BASE: &str = "http://localhost:3000";

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, String> {
    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }
    resp.json::<T>().await.map_err(|e| format!("Parse error: {e}"))
}

/// Fetches one page of the catalog. The server clamps out-of-range pages.
pub async fn fetch_products(page: usize) -> Result<Page<Product>, String> {
    let resp = Request::get(&format!("{API_BASE}/api/products"))
        .query([("page", page.to_string())])
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    read_json(resp).await
}

/// Runs a name search; `seq` comes back unchanged in the response.
pub async fn search_products(query: &str, seq: u64) -> Result<SearchResponse, String> {
    let resp = Request::get(&format!("{API_BASE}/api/search"))
        .query([("q", query.to_string()), ("seq", seq.to_string())])
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    read_json(resp).await
}

pub async fn fetch_contact() -> Result<ContactSettings, String> {
    let resp = Request::get(&format!("{API_BASE}/api/settings/contact"))
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    read_json(resp).await
}

/// Sends one chat turn (non-streaming).
pub async fn send_chat(request: &ChatRequest) -> Result<ChatReply, String> {
    let resp = Request::post(&format!("{API_BASE}/api/chat"))
        .json(request)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    read_json(resp).await
}
