use library_api::types::{AuthorForCreation, BookForCreation, BookForUpdate};
use serde::Serialize;

use crate::error::LibraryError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_GENRE_LENGTH: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 500;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// One failed rule, keyed by the offending member (or the body type for
/// cross-field rules).
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, LibraryError> {
    if input.len() > max_len {
        return Err(LibraryError::BadRequest(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string())
}

/// Validate a search query filter. Blank input means no filter.
pub fn validate_search(input: Option<&str>) -> Result<Option<String>, LibraryError> {
    optional_filter(input, MAX_SEARCH_LENGTH)
}

/// Validate a genre filter. Blank input means no filter.
pub fn validate_genre(input: Option<&str>) -> Result<Option<String>, LibraryError> {
    optional_filter(input, MAX_GENRE_LENGTH)
}

fn optional_filter(input: Option<&str>, max_len: usize) -> Result<Option<String>, LibraryError> {
    match input {
        Some(raw) => {
            let sanitized = sanitize_text(raw, max_len)?;
            Ok(Some(sanitized).filter(|s| !s.is_empty()))
        }
        None => Ok(None),
    }
}

fn check_title(title: Option<&str>, failures: &mut Vec<ValidationFailure>) {
    match title {
        Some(t) if !t.trim().is_empty() => {
            if t.chars().count() > MAX_TITLE_LENGTH {
                failures.push(ValidationFailure::new("title", "Max 500 characters"));
            }
        }
        _ => failures.push(ValidationFailure::new("title", "Please fill out the title")),
    }
}

fn check_description(
    description: Option<&str>,
    required: bool,
    failures: &mut Vec<ValidationFailure>,
) {
    match description {
        Some(d) if !d.trim().is_empty() => {
            if d.chars().count() > MAX_DESCRIPTION_LENGTH {
                failures.push(ValidationFailure::new("description", "Max 500 characters"));
            }
        }
        _ if required => failures.push(ValidationFailure::new(
            "description",
            "Please fill out the description",
        )),
        _ => {}
    }
}

fn check_distinct(
    body: &str,
    title: Option<&str>,
    description: Option<&str>,
    failures: &mut Vec<ValidationFailure>,
) {
    if let (Some(title), Some(description)) = (title, description) {
        if title == description {
            failures.push(ValidationFailure::new(
                body,
                "description can not be the same as title",
            ));
        }
    }
}

fn finish(failures: Vec<ValidationFailure>) -> Result<(), LibraryError> {
    if failures.is_empty() {
        Ok(())
    } else {
        Err(LibraryError::Validation(failures))
    }
}

/// Validate a book creation body: title required, both at most 500
/// characters, and the description must differ from the title.
pub fn validate_book_for_creation(book: &BookForCreation) -> Result<(), LibraryError> {
    let mut failures = Vec::new();
    collect_book_for_creation(book, "", &mut failures);
    finish(failures)
}

fn collect_book_for_creation(
    book: &BookForCreation,
    prefix: &str,
    failures: &mut Vec<ValidationFailure>,
) {
    let mut own = Vec::new();
    check_title(book.title.as_deref(), &mut own);
    check_description(book.description.as_deref(), false, &mut own);
    check_distinct(
        "BookForCreation",
        book.title.as_deref(),
        book.description.as_deref(),
        &mut own,
    );
    failures.extend(own.into_iter().map(|mut f| {
        f.field = format!("{}{}", prefix, f.field);
        f
    }));
}

/// Validate a full update body (also the result of applying a patch):
/// title and description both required.
pub fn validate_book_for_update(book: &BookForUpdate) -> Result<(), LibraryError> {
    let mut failures = Vec::new();
    check_title(book.title.as_deref(), &mut failures);
    check_description(book.description.as_deref(), true, &mut failures);
    check_distinct(
        "BookForUpdate",
        book.title.as_deref(),
        book.description.as_deref(),
        &mut failures,
    );
    finish(failures)
}

/// Validate the books nested in an author creation body.
pub fn validate_author_for_creation(author: &AuthorForCreation) -> Result<(), LibraryError> {
    let mut failures = Vec::new();
    for (index, book) in author.books.iter().enumerate() {
        collect_book_for_creation(book, &format!("books[{}].", index), &mut failures);
    }
    finish(failures)
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
