//! Client-side search, filtering and pagination of admin listings.

use std::fmt;

use crate::models::{Application, ApplicationStatus, Member};

/// Rows shown per listing page.
pub const PAGE_SIZE: usize = 10;

/// Pages shown on each side of the current page.
const PAGE_WINDOW: usize = 2;

/// Case-insensitive free-text matching for listing rows.
pub trait Searchable {
    /// Whether the row matches an already lowercased, non-empty needle.
    fn matches(&self, needle: &str) -> bool;
}

impl Searchable for Member {
    fn matches(&self, needle: &str) -> bool {
        self.full_name().to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

impl Searchable for Application {
    fn matches(&self, needle: &str) -> bool {
        self.personal.full_name.to_lowercase().contains(needle)
            || self.personal.email.to_lowercase().contains(needle)
            || self.application_id.to_lowercase().contains(needle)
    }
}

/// Rows matching `query`; a blank query keeps every row.
pub fn search<T: Searchable>(items: Vec<T>, query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items.into_iter().filter(|item| item.matches(&needle)).collect()
}

/// Applications with the given status; `None` keeps every row.
pub fn with_status(items: Vec<Application>, status: Option<ApplicationStatus>) -> Vec<Application> {
    match status {
        Some(status) => items.into_iter().filter(|a| a.status == status).collect(),
        None => items,
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// One-based current page
    pub page: usize,
    pub pages: usize,
    /// Rows across all pages
    pub total: usize,
}

impl<T> Paged<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// Markers for the pagination bar.
    pub fn markers(&self) -> Vec<PageMarker> {
        page_numbers(self.page, self.pages)
    }
}

/// Slice out page `page` (one-based, clamped into range).
///
/// # Examples
///
/// ```rust
/// use sugria_core::listing::paginate;
///
/// let paged = paginate((1..=25).collect::<Vec<_>>(), 3, 10);
/// assert_eq!(paged.items, vec![21, 22, 23, 24, 25]);
/// assert_eq!(paged.pages, 3);
/// ```
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Paged<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let pages = total.div_ceil(per_page);
    let page = page.clamp(1, pages.max(1));
    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();
    Paged {
        items,
        page,
        pages,
        total,
    }
}

/// An entry of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Ellipsis => write!(f, "…"),
        }
    }
}

/// Pagination bar: first page, last page and the pages within two of
/// `current`. A gap of a single page shows that page; longer gaps collapse
/// into an ellipsis.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageMarker> {
    if total == 0 {
        return Vec::new();
    }

    let mut range = vec![1];
    let low = current.saturating_sub(PAGE_WINDOW).max(2);
    let high = (current + PAGE_WINDOW).min(total.saturating_sub(1));
    range.extend(low..=high);
    if total > 1 {
        range.push(total);
    }

    let mut markers = Vec::with_capacity(range.len() + 2);
    let mut last: Option<usize> = None;
    for page in range {
        if let Some(prev) = last {
            match page - prev {
                2 => markers.push(PageMarker::Page(prev + 1)),
                1 => {}
                _ => markers.push(PageMarker::Ellipsis),
            }
        }
        markers.push(PageMarker::Page(page));
        last = Some(page);
    }
    markers
}
