//! Page materialization and pagination metadata.
//!
//! Filtering and ordering happen before counting and slicing, so a page is
//! stable across repeated requests against an unchanged source. Out-of-range
//! page parameters are clamped rather than rejected: a non-positive number or
//! size falls back to the defaults, and a page past the end resolves to the
//! last page.

use library_api::types::Paging;
use library_api::{PagingPolicy, QueryCommon};

/// A validated page position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Clamps raw page parameters according to the policy.
    pub fn new(page_number: i64, page_size: i64, policy: &PagingPolicy) -> Self {
        let common = QueryCommon {
            page_number,
            page_size,
            fields: None,
        }
        .normalized(policy);
        Self::from_common(&common)
    }

    /// Reads an already normalized query.
    pub fn from_common(common: &QueryCommon) -> Self {
        Self {
            page_number: common.page(),
            page_size: common.size(),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 0, &PagingPolicy::default())
    }
}

/// One page of an ordered collection plus the metadata describing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total_count: u64,
    page_size: u64,
    current_page: u64,
    total_pages: u64,
}

impl<T> Page<T> {
    /// Slices a filtered, ordered collection.
    pub fn create(ordered: Vec<T>, request: PageRequest) -> Self {
        let page_size = request.page_size.max(1);
        let total_count = ordered.len() as u64;
        let total_pages = total_count.div_ceil(page_size);
        let current_page = if total_pages >= 1 {
            request.page_number.clamp(1, total_pages)
        } else {
            1
        };
        let skip = ((current_page - 1) * page_size) as usize;
        let items = ordered
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .collect();
        Self {
            items,
            total_count,
            page_size,
            current_page,
            total_pages,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn paging(&self) -> Paging {
        Paging {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }

    /// Transforms the items while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }
}

/// Filters, orders and slices `source` into a page.
///
/// Ordering uses a stable sort on `sort_key`, so items with equal keys keep
/// their source order.
pub fn paginate<T, K: Ord>(
    source: impl IntoIterator<Item = T>,
    filter: impl Fn(&T) -> bool,
    sort_key: impl Fn(&T) -> K,
    request: PageRequest,
) -> Page<T> {
    let mut matching: Vec<T> = source.into_iter().filter(|item| filter(item)).collect();
    matching.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    Page::create(matching, request)
}
