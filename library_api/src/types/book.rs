//! Book representations exchanged with clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthorID;

/// Unique identifier for a book.
pub type BookID = Uuid;

/// Full representation of a book as exposed to clients.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: BookID,
    pub title: String,
    pub description: Option<String>,
    pub author_id: AuthorID,
}

/// Request body for creating a book under an author.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookForCreation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for a full update, and the document a JSON Patch is applied to.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookForUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
