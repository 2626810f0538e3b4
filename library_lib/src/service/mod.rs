//! Request handlers for the authors and books resources.
//!
//! Each operation takes already-decoded inputs (ids, query, body, the
//! `Accept` value) and produces an [`ApiResponse`]: status, headers and an
//! optional JSON body. Dispatching a transport request to an operation is
//! left to the caller.

mod authors;
mod books;

use http::StatusCode;
use library_api::{PagingPolicy, RouteTable, UrlBuilder};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::LibraryError;
use crate::repository::Repository;

pub const LOCATION_HEADER: &str = "Location";

/// Transport-neutral response produced by a [`LibraryService`] operation.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn created(location: String, body: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            headers: vec![(LOCATION_HEADER, location)],
            body: Some(body),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, header: (&'static str, String)) -> Self {
        self.headers.push(header);
        self
    }

    /// First value of the named header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Renders an error as a problem response. Server-side failures hide
    /// their details.
    pub fn from_error(error: &LibraryError) -> Self {
        let status = error.status_code();
        let body = match error {
            LibraryError::Validation(failures) => json!({
                "error": "validation failed",
                "failures": failures,
            }),
            e if e.is_client_error() => json!({ "error": e.to_string() }),
            _ => json!({ "error": "an unexpected fault happened, try again later" }),
        };
        Self {
            status,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    /// Flattens an operation result into a response.
    pub fn from_result(result: Result<ApiResponse, LibraryError>) -> Self {
        match result {
            Ok(response) => response,
            Err(error) => {
                if error.is_client_error() {
                    tracing::debug!("Request rejected: {}", error);
                } else {
                    tracing::error!("Request failed: {}", error);
                }
                Self::from_error(&error)
            }
        }
    }
}

/// The authors and books handlers over a repository and a URL builder.
pub struct LibraryService<R: Repository, U: UrlBuilder> {
    repository: R,
    urls: U,
    policy: PagingPolicy,
}

impl<R: Repository, U: UrlBuilder> LibraryService<R, U> {
    pub fn new(repository: R, urls: U, policy: PagingPolicy) -> Self {
        Self {
            repository,
            urls,
            policy,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn urls(&self) -> &U {
        &self.urls
    }

    pub fn policy(&self) -> &PagingPolicy {
        &self.policy
    }
}

impl<R: Repository> LibraryService<R, RouteTable> {
    /// Builds a service whose links resolve against the configured base URL.
    pub fn from_config(repository: R, config: &Config) -> Result<Self, LibraryError> {
        config.validate()?;
        let urls = RouteTable::new(&config.base_url)?;
        Ok(Self::new(repository, urls, config.paging))
    }
}

fn not_found(resource: &'static str, id: uuid::Uuid) -> LibraryError {
    tracing::debug!("{} {} not found", resource, id);
    LibraryError::not_found(resource, id)
}
