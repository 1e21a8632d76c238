use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::{Page, Product};

/// Row shape of the `site_settings` table. Empty strings mean "unset".
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct SiteSettings {
    pub whatsapp_number: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub seq: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageResponse {
    #[serde(flatten)]
    pub page: Page<Product>,
    pub snapshot_taken_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
