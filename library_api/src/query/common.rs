//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`PagingPolicy`].

use url::Url;

/// Page size used when the caller supplies none, or a non-positive one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Upper bound a requested page size is clamped to.
pub const MAX_PAGE_SIZE: u64 = 20;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination and field selection.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page_number: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_number = page_number;
        self
    }

    /// Sets the number of results per page.
    fn with_page_size(mut self, page_size: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = page_size;
        self
    }

    /// Restricts the returned representation to a comma-separated field list.
    fn with_fields(mut self, fields: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().fields = Some(fields.to_string());
        self
    }
}

/// Default and maximum page sizes applied when normalizing a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagingPolicy {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Fields shared by all collection queries: pagination and field selection.
///
/// Page values are kept exactly as supplied; [`QueryCommon::normalized`]
/// clamps them instead of rejecting out-of-range input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    pub page_number: i64,
    /// Results per page. Defaults to [`DEFAULT_PAGE_SIZE`].
    pub page_size: i64,
    /// Comma-separated list of fields to shape each item down to.
    pub fields: Option<String>,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE as i64,
            fields: None,
        }
    }
}

impl QueryCommon {
    /// Returns a copy with non-positive values replaced by defaults and the
    /// page size capped at the policy maximum.
    pub fn normalized(&self, policy: &PagingPolicy) -> QueryCommon {
        let page_number = if self.page_number <= 0 {
            1
        } else {
            self.page_number
        };
        let page_size = if self.page_size <= 0 {
            saturating_i64(policy.default_page_size)
        } else {
            self.page_size.min(saturating_i64(policy.max_page_size))
        };
        let fields = self
            .fields
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        QueryCommon {
            page_number,
            page_size,
            fields,
        }
    }

    /// Page number as an unsigned value, valid after normalization.
    pub fn page(&self) -> u64 {
        self.page_number.max(1) as u64
    }

    /// Page size as an unsigned value, valid after normalization.
    pub fn size(&self) -> u64 {
        self.page_size.max(1) as u64
    }

    /// Appends the `fields` parameter when one was requested.
    pub fn add_fields_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(fields) = &self.fields {
            url.query_pairs_mut().append_pair("fields", fields);
        };
        url
    }

    /// Appends the pagination parameters to the URL.
    pub fn add_paging_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("pageNumber", &self.page_number.to_string())
            .append_pair("pageSize", &self.page_size.to_string());
        url
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
