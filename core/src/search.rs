use serde::{Deserialize, Serialize};

use crate::models::Product;

/// Queries shorter than this (in chars) return nothing.
pub const MIN_QUERY_LEN: usize = 2;
pub const MAX_RESULTS: usize = 5;

/// Linear substring index over product names, built from one catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    products: Vec<Product>,
    // Lowercased names, parallel to `products`.
    folded_names: Vec<String>,
}

impl SearchIndex {
    pub fn new(products: Vec<Product>) -> Self {
        let folded_names = products.iter().map(|p| p.name.to_lowercase()).collect();
        Self { products, folded_names }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Case-insensitive name match, in load order, at most [`MAX_RESULTS`].
    /// Descriptions are not searched.
    pub fn query(&self, text: &str) -> Vec<Product> {
        if text.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        let needle = text.to_lowercase();
        self.products
            .iter()
            .zip(&self.folded_names)
            .filter(|(_, name)| name.contains(&needle))
            .map(|(product, _)| product.clone())
            .take(MAX_RESULTS)
            .collect()
    }
}

/// Stamps outgoing queries so a late response for an older query
/// cannot overwrite the results of a newer one.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuerySequencer {
    latest: u64,
}

impl QuerySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// Body of `GET /api/search`; `seq` echoes the caller's stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub seq: u64,
    pub results: Vec<Product>,
}
