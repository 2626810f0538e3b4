mod common;
pub use self::common::{PagingPolicy, Query, QueryCommon, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
mod authors;
pub use self::authors::AuthorsQuery;
