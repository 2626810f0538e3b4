//! Error types for the library layer.

use http::StatusCode;
use uuid::Uuid;

use crate::validation::ValidationFailure;

/// Errors produced by the library layer. Each maps to the HTTP status the
/// request handlers answer with.
#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    /// The `fields` parameter named a field the representation does not declare.
    #[error("invalid field request: {requested}")]
    InvalidFieldRequest { requested: String },
    /// The addressed resource does not exist.
    #[error("{resource} {id} not found")]
    ResourceNotFound { resource: &'static str, id: Uuid },
    /// The request collides with an existing resource.
    #[error("{0}")]
    Conflict(String),
    /// The request was malformed (missing body, oversized filter, ...).
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The request body failed validation.
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationFailure>),
    /// A response envelope could not be assembled consistently. Always a bug.
    #[error("envelope invariant violated: {0}")]
    EnvelopeInvariant(String),
    /// A link could not be resolved.
    #[error("url error: {0}")]
    Url(#[from] library_api::Error),
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The backing store failed to load or persist.
    #[error("storage error: {0}")]
    Storage(String),
    /// Configuration values are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LibraryError {
    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        Self::ResourceNotFound { resource, id }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFieldRequest { .. } | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::EnvelopeInvariant(_)
            | Self::Url(_)
            | Self::Serialization(_)
            | Self::Storage(_)
            | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for errors caused by the caller rather than by this process.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

fn summarize(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}
