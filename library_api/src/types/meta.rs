use serde::{Deserialize, Serialize};

/// Name of the out-of-band response header carrying pagination metadata.
pub const PAGINATION_HEADER: &str = "X-Pagination";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub total_count: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

/// Pagination header payload.
///
/// Plain responses carry the navigation links inside the header since the
/// body has no place for them; hypermedia responses put them in the body and
/// the header only reports counts.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum PaginationMetadata {
    #[serde(rename_all = "camelCase")]
    WithLinks {
        previous_page_link: Option<String>,
        next_page_link: Option<String>,
        #[serde(flatten)]
        paging: Paging,
    },
    Counts(Paging),
}

impl PaginationMetadata {
    pub fn paging(&self) -> &Paging {
        match self {
            PaginationMetadata::WithLinks { paging, .. } => paging,
            PaginationMetadata::Counts(paging) => paging,
        }
    }
}
