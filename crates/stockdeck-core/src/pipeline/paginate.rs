use serde::Serialize;

/// Records per page in the watchlist.
pub const PAGE_SIZE: usize = 18;

/// One page of an ordered collection plus navigation totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Requested page after clamping to `[1, total_pages]`.
    pub page_number: usize,
    /// Never below 1, so "Page 1 of 1" is valid for an empty collection.
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Slice `items` into page `page_number` (1-based). Out-of-range page
/// numbers are clamped rather than rejected.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_number: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page_number = page_number.clamp(1, total_pages);

    let start = ((page_number - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page_number,
        total_pages,
        total_items: items.len(),
        page_size,
    }
}
