use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use storefront_core::Product;
use tracing::error;

use crate::errors::AppError;
use crate::models::SiteSettings;

const SETTINGS_ID: &str = "config";

/// Read side of the external catalog. The storefront never writes to it.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every product, in store insertion order.
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError>;

    async fn fetch_site_settings(&self) -> Result<Option<SiteSettings>, AppError>;
}

#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn product_from_row(row: PgRow) -> Result<Product, AppError> {
    Ok(Product {
        id: row.try_get("id").map_err(|e| AppError::db_query("Failed to read id", e))?,
        name: row.try_get("name").map_err(|e| AppError::db_query("Failed to read name", e))?,
        price: row.try_get("price").map_err(|e| AppError::db_query("Failed to read price", e))?,
        description: row
            .try_get("description")
            .map_err(|e| AppError::db_query("Failed to read description", e))?,
        image_url: row
            .try_get("image_url")
            .map_err(|e| AppError::db_query("Failed to read image_url", e))?,
    })
}

#[async_trait]
impl CatalogStore for PgCatalogRepository {
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, price, description, image_url
             FROM products
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch products: {e}");
            AppError::db_query("Failed to fetch products", e)
        })?;

        rows.into_iter().map(product_from_row).collect()
    }

    async fn fetch_site_settings(&self) -> Result<Option<SiteSettings>, AppError> {
        sqlx::query_as::<_, SiteSettings>(
            "SELECT whatsapp_number, phone FROM site_settings WHERE id = $1",
        )
        .bind(SETTINGS_ID)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch site settings: {e}");
            AppError::db_query("Failed to fetch site settings", e)
        })
    }
}
