//! CLI subcommand implementations.

pub mod authors;
pub mod books;
pub mod reset;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use library_lib::{InMemoryRepository, LibraryError, LibraryService, RouteTable};
use serde::de::DeserializeOwned;

pub type Service = LibraryService<InMemoryRepository, RouteTable>;

/// Request body source shared by the create and update commands.
#[derive(Args)]
pub struct BodyArgs {
    /// JSON request body
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the JSON request body from a file
    #[arg(long)]
    pub body_file: Option<PathBuf>,
}

impl BodyArgs {
    pub fn read_text(&self) -> Result<Option<String>> {
        match (&self.body, &self.body_file) {
            (Some(body), _) => Ok(Some(body.clone())),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("reading request body from {}", path.display())),
            (None, None) => Ok(None),
        }
    }
}

/// Decodes a request body. Malformed JSON is the caller's fault, so it is
/// reported like any other bad request.
pub fn parse_body<T: DeserializeOwned>(text: Option<String>) -> Result<Option<T>, LibraryError> {
    text.map(|t| {
        serde_json::from_str(&t)
            .map_err(|e| LibraryError::BadRequest(format!("malformed request body: {}", e)))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use library_lib::library_api::types::BookForCreation;

    use super::*;

    #[test]
    fn test_parse_body_absent() {
        let parsed: Option<BookForCreation> = parse_body(None).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_parse_body_valid() {
        let parsed: Option<BookForCreation> =
            parse_body(Some(r#"{"title": "Carrie"}"#.to_string())).unwrap();
        assert_eq!(parsed.unwrap().title.as_deref(), Some("Carrie"));
    }

    #[test]
    fn test_parse_body_malformed_is_bad_request() {
        let err = parse_body::<BookForCreation>(Some("{title".to_string())).unwrap_err();
        assert!(matches!(err, LibraryError::BadRequest(_)));
    }

    #[test]
    fn test_read_text_prefers_inline_body() {
        let args = BodyArgs {
            body: Some("{}".to_string()),
            body_file: Some(PathBuf::from("/nonexistent")),
        };
        assert_eq!(args.read_text().unwrap().as_deref(), Some("{}"));
    }
}
