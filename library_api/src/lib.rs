//! Wire contract for the library resource API: representations, query
//! builders, and route-to-URL resolution.

mod errors;
mod query;
mod routes;
pub mod types;
pub use self::errors::Error;
pub use self::query::{
    AuthorsQuery, PagingPolicy, Query, QueryCommon, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use self::routes::{Route, RouteTable, RouteValues, UrlBuilder};
