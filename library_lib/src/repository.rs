//! Storage collaborator for authors and their books.

use std::path::Path;

use dashmap::DashMap;
use library_api::types::{AuthorID, BookID};
use library_api::AuthorsQuery;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Author, Book};
use crate::error::LibraryError;
use crate::paging::{paginate, Page, PageRequest};
use crate::seed::seed_entities;

/// Storage contract consumed by the request handlers.
///
/// Lookups report absence with `None`; only mutations fail.
pub trait Repository: Send + Sync {
    /// One page of authors. `query` is expected to be normalized: paging
    /// clamped and filters sanitized.
    fn authors(&self, query: &AuthorsQuery) -> Page<Author>;
    fn author(&self, id: AuthorID) -> Option<Author>;
    fn author_exists(&self, id: AuthorID) -> bool;
    fn add_author(&self, author: Author) -> Result<(), LibraryError>;
    /// Removes the author together with all of their books.
    fn delete_author(&self, id: AuthorID) -> Result<(), LibraryError>;
    /// Books of an author ordered by title.
    fn books_for_author(&self, author_id: AuthorID) -> Vec<Book>;
    fn book_for_author(&self, author_id: AuthorID, id: BookID) -> Option<Book>;
    /// Stores a book under an author, assigning an id when the book's id is nil.
    fn add_book_for_author(&self, author_id: AuthorID, book: Book) -> Result<Book, LibraryError>;
    fn update_book_for_author(&self, book: &Book) -> Result<(), LibraryError>;
    fn delete_book(&self, book: &Book) -> Result<(), LibraryError>;
}

/// Serializable copy of the whole store, in a stable order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub authors: Vec<Author>,
    pub books: Vec<Book>,
}

/// Thread-safe in-memory store backed by `DashMap`.
#[derive(Default)]
pub struct InMemoryRepository {
    authors: DashMap<AuthorID, Author>,
    books: DashMap<BookID, Book>,
}

impl InMemoryRepository {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the embedded seed catalogue.
    pub fn seeded() -> Result<Self, LibraryError> {
        let (authors, books) = seed_entities()?;
        Ok(Self::from_snapshot(Snapshot { authors, books }))
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let repository = Self::new();
        for author in snapshot.authors {
            repository.authors.insert(author.id, author);
        }
        for book in snapshot.books {
            repository.books.insert(book.id, book);
        }
        repository
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut authors: Vec<Author> = self.authors.iter().map(|e| e.value().clone()).collect();
        authors.sort_by(|a, b| author_key(a).cmp(&author_key(b)));
        let mut books: Vec<Book> = self.books.iter().map(|e| e.value().clone()).collect();
        books.sort_by(|a, b| (a.author_id, &a.title, a.id).cmp(&(b.author_id, &b.title, b.id)));
        Snapshot { authors, books }
    }

    /// Loads the store from a JSON data file, falling back to the seed
    /// catalogue when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        if !path.exists() {
            tracing::info!("No data file at {}, starting from seed data", path.display());
            return Self::seeded();
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| LibraryError::Storage(format!("reading {}: {}", path.display(), e)))?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} authors and {} books from {}",
            snapshot.authors.len(),
            snapshot.books.len(),
            path.display()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn save(&self, path: &Path) -> Result<(), LibraryError> {
        let content = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, content)
            .map_err(|e| LibraryError::Storage(format!("writing {}: {}", path.display(), e)))?;
        tracing::debug!("Saved data file {}", path.display());
        Ok(())
    }
}

/// Name order ignores case; `id` keeps ties deterministic.
fn author_key(author: &Author) -> (String, String, Uuid) {
    (
        author.first_name.to_lowercase(),
        author.last_name.to_lowercase(),
        author.id,
    )
}

fn matches_filters(author: &Author, genre: Option<&str>, search: Option<&str>) -> bool {
    let genre_ok = genre.map_or(true, |g| author.genre.to_lowercase() == g);
    let search_ok = search.map_or(true, |s| {
        author.genre.to_lowercase().contains(s)
            || author.first_name.to_lowercase().contains(s)
            || author.last_name.to_lowercase().contains(s)
    });
    genre_ok && search_ok
}

impl Repository for InMemoryRepository {
    fn authors(&self, query: &AuthorsQuery) -> Page<Author> {
        let genre = query.genre.as_deref().map(|g| g.trim().to_lowercase());
        let search = query.search_query.as_deref().map(|s| s.trim().to_lowercase());
        let source: Vec<Author> = self.authors.iter().map(|e| e.value().clone()).collect();
        paginate(
            source,
            |author| matches_filters(author, genre.as_deref(), search.as_deref()),
            author_key,
            PageRequest::from_common(&query.common),
        )
    }

    fn author(&self, id: AuthorID) -> Option<Author> {
        self.authors.get(&id).map(|e| e.value().clone())
    }

    fn author_exists(&self, id: AuthorID) -> bool {
        self.authors.contains_key(&id)
    }

    fn add_author(&self, author: Author) -> Result<(), LibraryError> {
        if self.authors.contains_key(&author.id) {
            return Err(LibraryError::Conflict(format!("author {} already exists", author.id)));
        }
        tracing::debug!("Adding author {}", author.id);
        self.authors.insert(author.id, author);
        Ok(())
    }

    fn delete_author(&self, id: AuthorID) -> Result<(), LibraryError> {
        if self.authors.remove(&id).is_none() {
            return Err(LibraryError::not_found("author", id));
        }
        self.books.retain(|_, book| book.author_id != id);
        tracing::debug!("Deleted author {} and their books", id);
        Ok(())
    }

    fn books_for_author(&self, author_id: AuthorID) -> Vec<Book> {
        let mut books: Vec<Book> = self
            .books
            .iter()
            .filter(|e| e.value().author_id == author_id)
            .map(|e| e.value().clone())
            .collect();
        books.sort_by(|a, b| (&a.title, a.id).cmp(&(&b.title, b.id)));
        books
    }

    fn book_for_author(&self, author_id: AuthorID, id: BookID) -> Option<Book> {
        self.books
            .get(&id)
            .filter(|e| e.value().author_id == author_id)
            .map(|e| e.value().clone())
    }

    fn add_book_for_author(&self, author_id: AuthorID, mut book: Book) -> Result<Book, LibraryError> {
        if !self.authors.contains_key(&author_id) {
            return Err(LibraryError::not_found("author", author_id));
        }
        if book.id.is_nil() {
            book.id = Uuid::new_v4();
        }
        if self.books.contains_key(&book.id) {
            return Err(LibraryError::Conflict(format!("book {} already exists", book.id)));
        }
        book.author_id = author_id;
        tracing::debug!("Adding book {} for author {}", book.id, author_id);
        self.books.insert(book.id, book.clone());
        Ok(book)
    }

    fn update_book_for_author(&self, book: &Book) -> Result<(), LibraryError> {
        match self.books.get_mut(&book.id) {
            Some(mut existing) if existing.author_id == book.author_id => {
                *existing = book.clone();
                Ok(())
            }
            _ => Err(LibraryError::not_found("book", book.id)),
        }
    }

    fn delete_book(&self, book: &Book) -> Result<(), LibraryError> {
        match self.books.remove(&book.id) {
            Some(_) => Ok(()),
            None => Err(LibraryError::not_found("book", book.id)),
        }
    }
}
