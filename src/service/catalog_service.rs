use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use storefront_core::order::{sanitize_number, DEFAULT_PHONE, DEFAULT_WHATSAPP_NUMBER};
use storefront_core::{paginate, ContactSettings, Page, Product, SearchIndex};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::db::CatalogStore;
use crate::errors::AppError;
use crate::models::SiteSettings;

/// One consistent view of the catalog, shared by search, paging and the chat prompt.
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub index: SearchIndex,
    pub contact: ContactSettings,
    pub taken_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    fn new(products: Vec<Product>, contact: ContactSettings) -> Self {
        Self {
            index: SearchIndex::new(products.clone()),
            products,
            contact,
            taken_at: Utc::now(),
        }
    }

    fn empty() -> Self {
        Self::new(Vec::new(), default_contact())
    }
}

fn default_contact() -> ContactSettings {
    ContactSettings {
        whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
        phone: DEFAULT_PHONE.to_string(),
    }
}

fn contact_from(settings: SiteSettings) -> ContactSettings {
    let phone = settings.phone.trim();
    ContactSettings {
        whatsapp_number: sanitize_number(&settings.whatsapp_number),
        phone: if phone.is_empty() { DEFAULT_PHONE.to_string() } else { phone.to_string() },
    }
}

/// Upper bound on how long a failed load is served before the store is tried again.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(5);

struct Cached {
    snapshot: Arc<CatalogSnapshot>,
    expires_at: Instant,
}

/// Read-through cache over the catalog store with a fixed TTL.
///
/// A failed refresh keeps serving the previous snapshot, or an empty one
/// if nothing was ever loaded. Either is cached for `min(ttl, RETRY_BACKOFF)`,
/// so during an outage at most one request per interval waits on the store.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    ttl: Duration,
    cached: Arc<RwLock<Option<Cached>>>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, ttl: Duration) -> Self {
        Self { store, ttl, cached: Arc::new(RwLock::new(None)) }
    }

    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        {
            let guard = self.cached.read().await;
            if let Some(snapshot) = self.fresh(&guard) {
                return snapshot;
            }
        }

        let mut guard = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(snapshot) = self.fresh(&guard) {
            return snapshot;
        }

        match self.load().await {
            Ok(snapshot) => {
                info!(
                    "Catalog snapshot refreshed: {} products",
                    snapshot.products.len()
                );
                let snapshot = Arc::new(snapshot);
                *guard = Some(Cached {
                    snapshot: snapshot.clone(),
                    expires_at: Instant::now() + self.ttl,
                });
                snapshot
            }
            Err(e) => {
                let retry_in = self.ttl.min(RETRY_BACKOFF);
                warn!("{e}; serving previous catalog snapshot, retrying in {retry_in:?}");
                let snapshot = guard
                    .take()
                    .map(|c| c.snapshot)
                    .unwrap_or_else(|| Arc::new(CatalogSnapshot::empty()));
                *guard = Some(Cached {
                    snapshot: snapshot.clone(),
                    expires_at: Instant::now() + retry_in,
                });
                snapshot
            }
        }
    }

    pub async fn page(&self, page: usize) -> (Page<Product>, DateTime<Utc>) {
        let snapshot = self.snapshot().await;
        (paginate(&snapshot.products, page), snapshot.taken_at)
    }

    pub async fn search(&self, text: &str) -> Vec<Product> {
        let results = self.snapshot().await.index.query(text);
        debug!("Search '{text}' matched {} products", results.len());
        results
    }

    pub async fn contact(&self) -> ContactSettings {
        self.snapshot().await.contact.clone()
    }

    fn fresh(&self, cached: &Option<Cached>) -> Option<Arc<CatalogSnapshot>> {
        cached
            .as_ref()
            .filter(|c| Instant::now() < c.expires_at)
            .map(|c| c.snapshot.clone())
    }

    async fn load(&self) -> Result<CatalogSnapshot, AppError> {
        let products = self
            .store
            .fetch_products()
            .await
            .map_err(|e| AppError::IndexUnavailable { reason: e.to_string() })?;

        let contact = match self.store.fetch_site_settings().await {
            Ok(Some(settings)) => contact_from(settings),
            Ok(None) => default_contact(),
            Err(e) => {
                warn!("Site settings unavailable, using defaults: {e}");
                default_contact()
            }
        };

        Ok(CatalogSnapshot::new(products, contact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{product, InMemoryCatalog};

    fn service(store: Arc<InMemoryCatalog>, ttl: Duration) -> CatalogService {
        CatalogService::new(store, ttl)
    }

    #[tokio::test]
    async fn search_page_and_contact_share_one_snapshot() {
        let store = Arc::new(InMemoryCatalog::with_products(vec![
            product("1", "Panadol", 50.0),
            product("2", "Brufen", 80.0),
        ]));
        let catalog = service(store.clone(), Duration::from_secs(60));

        assert_eq!(catalog.search("pan").await.len(), 1);
        let (page, _) = catalog.page(1).await;
        assert_eq!(page.items.len(), 2);
        catalog.contact().await;

        assert_eq!(store.product_fetches(), 1);
    }

    #[tokio::test]
    async fn expired_snapshot_is_reloaded() {
        let store = Arc::new(InMemoryCatalog::with_products(vec![product("1", "Panadol", 50.0)]));
        let catalog = service(store.clone(), Duration::ZERO);

        assert!(catalog.search("brufen").await.is_empty());
        store.push_product(product("2", "Brufen", 80.0));
        assert_eq!(catalog.search("brufen").await.len(), 1);
        assert_eq!(store.product_fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_first_load_degrades_to_empty() {
        let store = Arc::new(InMemoryCatalog::with_products(vec![product("1", "Panadol", 50.0)]));
        store.set_failing(true);
        let catalog = service(store.clone(), Duration::from_secs(60));

        assert!(catalog.search("panadol").await.is_empty());
        let (page, _) = catalog.page(1).await;
        assert_eq!(page.total_pages, 0);
        assert_eq!(store.product_fetches(), 1);

        // The empty snapshot only lives for the retry backoff.
        store.set_failing(false);
        tokio::time::advance(RETRY_BACKOFF).await;
        assert_eq!(catalog.search("panadol").await.len(), 1);
        assert_eq!(store.product_fetches(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let store = Arc::new(InMemoryCatalog::with_products(vec![product("1", "Panadol", 50.0)]));
        let catalog = service(store.clone(), Duration::ZERO);

        assert_eq!(catalog.search("panadol").await.len(), 1);
        store.set_failing(true);
        assert_eq!(catalog.search("panadol").await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_outage_is_hit_once_per_backoff() {
        let ttl = Duration::from_millis(50);
        let delay = Duration::from_millis(300);
        let store = Arc::new(InMemoryCatalog::with_products(vec![product("1", "Panadol", 50.0)]));
        let catalog = service(store.clone(), ttl);
        assert_eq!(catalog.search("pan").await.len(), 1);

        store.set_failing(true);
        store.set_delay(delay);
        tokio::time::advance(ttl).await;

        let started = Instant::now();
        let results = tokio::join!(
            catalog.search("pan"),
            catalog.search("pan"),
            catalog.search("pan"),
            catalog.search("pan"),
            catalog.search("pan"),
        );

        for found in [results.0, results.1, results.2, results.3, results.4] {
            assert_eq!(found.len(), 1);
        }
        assert_eq!(store.product_fetches(), 2);
        assert!(started.elapsed() < delay * 2, "took {:?}", started.elapsed());

        // Inside the backoff window the stale snapshot is served without touching the store.
        assert_eq!(catalog.search("pan").await.len(), 1);
        assert_eq!(store.product_fetches(), 2);

        tokio::time::advance(ttl).await;
        catalog.search("pan").await;
        assert_eq!(store.product_fetches(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_on_expired_cache_share_one_refresh() {
        let ttl = Duration::from_secs(1);
        let store = Arc::new(InMemoryCatalog::with_products(vec![product("1", "Panadol", 50.0)]));
        let catalog = service(store.clone(), ttl);
        catalog.snapshot().await;

        store.push_product(product("2", "Panadol Extra", 70.0));
        store.set_delay(Duration::from_millis(100));
        tokio::time::advance(ttl).await;

        let (first, second) = tokio::join!(catalog.snapshot(), catalog.snapshot());

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.products.len(), 2);
        assert_eq!(store.product_fetches(), 2);
    }

    #[tokio::test]
    async fn contact_is_sanitized_with_fallbacks() {
        let store = Arc::new(InMemoryCatalog::with_products(vec![]).with_settings(SiteSettings {
            whatsapp_number: "+92 300 1234567".into(),
            phone: "  ".into(),
        }));
        let contact = service(store, Duration::from_secs(60)).contact().await;

        assert_eq!(contact.whatsapp_number, "923001234567");
        assert_eq!(contact.phone, DEFAULT_PHONE);
    }

    #[tokio::test]
    async fn missing_settings_use_defaults() {
        let store = Arc::new(InMemoryCatalog::with_products(vec![]));
        let contact = service(store, Duration::from_secs(60)).contact().await;
        assert_eq!(contact, default_contact());
    }
}
