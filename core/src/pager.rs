use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
}

/// Slices `items` into the requested [`PAGE_SIZE`] page.
///
/// Out-of-range pages are clamped into `1..=total_pages`; an empty list
/// yields page 1 with no items and zero pages.
pub fn paginate<T: Clone>(items: &[T], page: usize) -> Page<T> {
    let total_pages = items.len().div_ceil(PAGE_SIZE);
    let page = page.min(total_pages).max(1);
    let start = (page - 1) * PAGE_SIZE;
    let shown = items.iter().skip(start).take(PAGE_SIZE).cloned().collect();
    Page { items: shown, page, total_pages }
}
