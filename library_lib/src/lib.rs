//! Library layer for the library resource API: paging, field shaping,
//! hypermedia links, response composition, and the request handlers.
//!
//! Builds on the `library_api` contract crate with an in-memory repository,
//! input validation, JSON Patch support, and embedded seed data.

pub mod compose;
pub mod config;
pub mod entities;
pub mod error;
pub mod links;
pub mod paging;
pub mod patch;
pub mod repository;
pub mod seed;
pub mod service;
pub mod shaping;
pub mod validation;

pub use library_api;
pub use library_api::types;
pub use library_api::{AuthorsQuery, PagingPolicy, Query, Route, RouteTable, UrlBuilder};

pub use compose::{Envelope, MediaType, ResponseComposer, HATEOAS_MEDIA_TYPE};
pub use config::Config;
pub use entities::{Author, Book};
pub use error::LibraryError;
pub use links::LinkAssembler;
pub use paging::{Page, PageRequest};
pub use repository::{InMemoryRepository, Repository};
pub use service::{ApiResponse, LibraryService};
pub use shaping::{FieldSelection, Projection, Shape};
