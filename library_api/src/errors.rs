//! Error types for the API contract layer.

/// Errors that can occur while resolving routes into URLs.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The configured base URL could not be parsed or cannot carry a path.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// A route template placeholder had no matching route value.
    #[error("route {route} is missing a value for {{{key}}}")]
    MissingRouteValue { route: &'static str, key: &'static str },
}
