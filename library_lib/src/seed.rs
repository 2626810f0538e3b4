//! Embedded seed catalogue for a fresh repository.

use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{Author, Book};
use crate::error::LibraryError;

#[derive(Debug, Deserialize)]
pub struct SeedBook {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedAuthor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub genre: String,
    #[serde(default, rename = "book")]
    pub books: Vec<SeedBook>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    author: Vec<SeedAuthor>,
}

/// Load seed data from embedded TOML file.
///
/// The TOML file is included at compile time via include_str!.
pub fn load_seed_data() -> Result<Vec<SeedAuthor>, LibraryError> {
    let toml_content = include_str!("../../seed_data/library_seed.toml");

    let seed_file: SeedFile =
        toml::from_str(toml_content).map_err(|e| LibraryError::Storage(e.to_string()))?;

    Ok(seed_file.author)
}

/// Flattens seed records into stored entities.
pub fn seed_entities() -> Result<(Vec<Author>, Vec<Book>), LibraryError> {
    let mut authors = Vec::new();
    let mut books = Vec::new();
    for seed in load_seed_data()? {
        books.extend(seed.books.into_iter().map(|b| Book {
            id: b.id,
            title: b.title,
            description: b.description,
            author_id: seed.id,
        }));
        authors.push(Author {
            id: seed.id,
            first_name: seed.first_name,
            last_name: seed.last_name,
            genre: seed.genre,
        });
    }
    Ok((authors, books))
}
