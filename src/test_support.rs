use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use storefront_core::conversation::WireMessage;
use storefront_core::Product;

use crate::agent::CompletionBackend;
use crate::db::CatalogStore;
use crate::errors::AppError;
use crate::models::SiteSettings;

pub fn product(id: &str, name: &str, price: f64) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: None,
        image_url: None,
    }
}

/// Catalog store backed by a vector, with switches to simulate slow or failed fetches.
#[derive(Default)]
pub struct InMemoryCatalog {
    products: Mutex<Vec<Product>>,
    settings: Option<SiteSettings>,
    failing: AtomicBool,
    delay: Mutex<Duration>,
    product_fetches: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products: Mutex::new(products), ..Self::default() }
    }

    pub fn with_settings(mut self, settings: SiteSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn push_product(&self, product: Product) {
        self.products.lock().unwrap().push(product);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn product_fetches(&self) -> usize {
        self.product_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
        self.product_fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Unexpected("catalog offline".into()));
        }
        Ok(self.products.lock().unwrap().clone())
    }

    async fn fetch_site_settings(&self) -> Result<Option<SiteSettings>, AppError> {
        Ok(self.settings.clone())
    }
}

/// Completion backend that records every request and answers with a fixed outcome.
pub struct ScriptedCompletion {
    reply: Option<String>,
    requests: Mutex<Vec<Vec<WireMessage>>>,
}

impl ScriptedCompletion {
    pub fn replying(reply: &str) -> Self {
        Self { reply: Some(reply.to_string()), requests: Mutex::new(Vec::new()) }
    }

    pub fn failing() -> Self {
        Self { reply: None, requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<Vec<WireMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedCompletion {
    async fn complete(&self, messages: &[WireMessage]) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.reply
            .clone()
            .ok_or_else(|| AppError::CompletionFailed { message: "upstream 500".into() })
    }
}
