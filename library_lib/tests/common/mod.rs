#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use library_lib::library_api::types::{AuthorID, BookID};
use library_lib::repository::Snapshot;
use library_lib::{
    Author, AuthorsQuery, Book, Config, InMemoryRepository, LibraryError, LibraryService, Page,
    Repository, RouteTable,
};
use uuid::Uuid;

pub const BASE: &str = "http://localhost:5000";
pub const KING: &str = "25320c5e-f58a-4b1f-b63a-8ee07a840bdf";

pub fn king() -> AuthorID {
    Uuid::parse_str(KING).unwrap()
}

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

pub fn fixture_repository() -> InMemoryRepository {
    let snapshot: Snapshot = serde_json::from_str(&load_fixture("library.json")).unwrap();
    InMemoryRepository::from_snapshot(snapshot)
}

pub fn service<R: Repository>(repository: R) -> LibraryService<R, RouteTable> {
    LibraryService::from_config(repository, &Config::default()).unwrap()
}

pub fn seeded_service() -> LibraryService<InMemoryRepository, RouteTable> {
    service(InMemoryRepository::seeded().unwrap())
}

/// Repository wrapper counting every call that reaches storage.
pub struct CountingRepository<R> {
    inner: R,
    calls: AtomicUsize,
}

impl<R: Repository> CountingRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl<R: Repository> Repository for CountingRepository<R> {
    fn authors(&self, query: &AuthorsQuery) -> Page<Author> {
        self.hit();
        self.inner.authors(query)
    }
    fn author(&self, id: AuthorID) -> Option<Author> {
        self.hit();
        self.inner.author(id)
    }
    fn author_exists(&self, id: AuthorID) -> bool {
        self.hit();
        self.inner.author_exists(id)
    }
    fn add_author(&self, author: Author) -> Result<(), LibraryError> {
        self.hit();
        self.inner.add_author(author)
    }
    fn delete_author(&self, id: AuthorID) -> Result<(), LibraryError> {
        self.hit();
        self.inner.delete_author(id)
    }
    fn books_for_author(&self, author_id: AuthorID) -> Vec<Book> {
        self.hit();
        self.inner.books_for_author(author_id)
    }
    fn book_for_author(&self, author_id: AuthorID, id: BookID) -> Option<Book> {
        self.hit();
        self.inner.book_for_author(author_id, id)
    }
    fn add_book_for_author(&self, author_id: AuthorID, book: Book) -> Result<Book, LibraryError> {
        self.hit();
        self.inner.add_book_for_author(author_id, book)
    }
    fn update_book_for_author(&self, book: &Book) -> Result<(), LibraryError> {
        self.hit();
        self.inner.update_book_for_author(book)
    }
    fn delete_book(&self, book: &Book) -> Result<(), LibraryError> {
        self.hit();
        self.inner.delete_book(book)
    }
}
