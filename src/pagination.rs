use serde::Serialize;

/// Number of page links shown around the current page.
pub const PAGE_WINDOW: usize = 5;

/// Number of pages needed to show `total_items`, never less than one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Brings a requested page back into `[1, total_pages]`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Contiguous window of page numbers centred on `current_page` where possible.
///
/// The window has `min(window, total_pages)` entries and always contains the
/// (clamped) current page.
pub fn compute_visible_pages(current_page: usize, total_pages: usize, window: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let current_page = clamp_page(current_page, total_pages);
    let length = window.min(total_pages);
    if length == 0 {
        return vec![];
    }

    let last_start = total_pages - length + 1;
    let start = current_page
        .saturating_sub(window / 2)
        .clamp(1, last_start);

    (start..start + length).collect()
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<usize>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = total_pages(total_items, page_size);
        let page = clamp_page(current_page, total_pages);

        Self {
            items,
            pages: compute_visible_pages(page, total_pages, PAGE_WINDOW),
            page,
            page_size,
            total_items,
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts the items while keeping the page bookkeeping.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pages: self.pages,
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}
