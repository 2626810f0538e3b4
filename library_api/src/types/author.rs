//! Author representations exchanged with clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BookForCreation;

/// Unique identifier for an author.
pub type AuthorID = Uuid;

/// Full representation of an author as exposed to clients.
///
/// The serialized field names are the shaping contract: `fields=` requests
/// are matched against them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: AuthorID,
    pub first_name: String,
    pub last_name: String,
    pub genre: String,
}

/// Request body for creating an author, optionally with books.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreation {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub books: Vec<BookForCreation>,
}
