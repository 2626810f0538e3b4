use library_api::types::{AuthorID, BookDto, BookForCreation, BookForUpdate, BookID};
use library_api::{Route, RouteValues, UrlBuilder};
use uuid::Uuid;

use super::{not_found, ApiResponse, LibraryService};
use crate::compose::ResponseComposer;
use crate::entities::Book;
use crate::error::LibraryError;
use crate::links::LinkAssembler;
use crate::patch::PatchDocument;
use crate::repository::Repository;
use crate::shaping::FieldSelection;
use crate::validation::{validate_book_for_creation, validate_book_for_update};

impl<R: Repository, U: UrlBuilder> LibraryService<R, U> {
    fn require_author(&self, author_id: AuthorID) -> Result<(), LibraryError> {
        if self.repository.author_exists(author_id) {
            Ok(())
        } else {
            Err(not_found("author", author_id))
        }
    }

    fn book_location(&self, book: &Book) -> Result<String, LibraryError> {
        Ok(self.urls.link(
            Route::GetBookForAuthor,
            &RouteValues::new().with("authorId", book.author_id).with("id", book.id),
        )?)
    }

    /// Single book body, with book links in hypermedia mode.
    fn book_body(
        &self,
        composer: &ResponseComposer,
        book: &Book,
    ) -> Result<serde_json::Value, LibraryError> {
        let links = if composer.wants_links() {
            Some(LinkAssembler::new(&self.urls).for_book(book.author_id, book.id)?)
        } else {
            None
        };
        let envelope = composer.resource(FieldSelection::all().project(&BookDto::from(book)), links)?;
        Ok(serde_json::to_value(&envelope)?)
    }

    /// `GET /api/authors/{authorId}/books`
    pub fn get_books_for_author(
        &self,
        author_id: AuthorID,
        accept: Option<&str>,
    ) -> Result<ApiResponse, LibraryError> {
        self.require_author(author_id)?;
        let books = self.repository.books_for_author(author_id);

        let composer = ResponseComposer::from_accept(accept);
        let assembler = LinkAssembler::new(&self.urls);
        let items = books
            .iter()
            .map(|book| -> Result<_, LibraryError> {
                let links = if composer.wants_links() {
                    Some(assembler.for_book(author_id, book.id)?)
                } else {
                    None
                };
                Ok((FieldSelection::all().project(&BookDto::from(book)), links))
            })
            .collect::<Result<Vec<_>, LibraryError>>()?;
        let links = if composer.wants_links() {
            Some(assembler.for_books(author_id)?)
        } else {
            None
        };
        let envelope = composer.collection(items, links)?;
        Ok(ApiResponse::ok(serde_json::to_value(&envelope)?))
    }

    /// `GET /api/authors/{authorId}/books/{id}`
    pub fn get_book_for_author(
        &self,
        author_id: AuthorID,
        id: BookID,
        accept: Option<&str>,
    ) -> Result<ApiResponse, LibraryError> {
        self.require_author(author_id)?;
        let book = self
            .repository
            .book_for_author(author_id, id)
            .ok_or_else(|| not_found("book", id))?;
        let composer = ResponseComposer::from_accept(accept);
        Ok(ApiResponse::ok(self.book_body(&composer, &book)?))
    }

    /// `POST /api/authors/{authorId}/books`
    pub fn create_book_for_author(
        &self,
        author_id: AuthorID,
        body: Option<BookForCreation>,
        accept: Option<&str>,
    ) -> Result<ApiResponse, LibraryError> {
        let body = body.ok_or_else(|| LibraryError::BadRequest("book body is required".into()))?;
        validate_book_for_creation(&body)?;
        self.require_author(author_id)?;

        let book = self
            .repository
            .add_book_for_author(author_id, Book::from_creation(Uuid::nil(), author_id, &body))?;
        tracing::info!("Created book {} for author {}", book.id, author_id);

        let composer = ResponseComposer::from_accept(accept);
        let body = self.book_body(&composer, &book)?;
        Ok(ApiResponse::created(self.book_location(&book)?, body))
    }

    /// `PUT /api/authors/{authorId}/books/{id}`: updates the book, or creates
    /// it under the given id when it does not exist.
    pub fn update_book_for_author(
        &self,
        author_id: AuthorID,
        id: BookID,
        body: Option<BookForUpdate>,
        accept: Option<&str>,
    ) -> Result<ApiResponse, LibraryError> {
        let body = body.ok_or_else(|| LibraryError::BadRequest("book body is required".into()))?;
        self.require_author(author_id)?;
        validate_book_for_update(&body)?;
        self.upsert_book(author_id, id, &body, accept)
    }

    /// `PATCH /api/authors/{authorId}/books/{id}`: applies a JSON Patch to
    /// the book, or to an empty book which is then created under the given id.
    pub fn partially_update_book_for_author(
        &self,
        author_id: AuthorID,
        id: BookID,
        patch: Option<PatchDocument>,
        accept: Option<&str>,
    ) -> Result<ApiResponse, LibraryError> {
        let patch = patch.ok_or_else(|| LibraryError::BadRequest("patch document is required".into()))?;
        self.require_author(author_id)?;

        let current = self
            .repository
            .book_for_author(author_id, id)
            .map(|book| book.to_update())
            .unwrap_or_default();
        let patched = patch.apply(&current).map_err(LibraryError::Validation)?;
        validate_book_for_update(&patched)?;
        self.upsert_book(author_id, id, &patched, accept)
    }

    fn upsert_book(
        &self,
        author_id: AuthorID,
        id: BookID,
        update: &BookForUpdate,
        accept: Option<&str>,
    ) -> Result<ApiResponse, LibraryError> {
        match self.repository.book_for_author(author_id, id) {
            Some(mut book) => {
                book.apply_update(update);
                self.repository.update_book_for_author(&book)?;
                tracing::info!("Updated book {} for author {}", id, author_id);
                Ok(ApiResponse::no_content())
            }
            None => {
                let book = self
                    .repository
                    .add_book_for_author(author_id, Book::from_update(id, author_id, update))?;
                tracing::info!("Upserted book {} for author {}", book.id, author_id);
                let composer = ResponseComposer::from_accept(accept);
                let body = self.book_body(&composer, &book)?;
                Ok(ApiResponse::created(self.book_location(&book)?, body))
            }
        }
    }

    /// `DELETE /api/authors/{authorId}/books/{id}`
    pub fn delete_book_for_author(
        &self,
        author_id: AuthorID,
        id: BookID,
    ) -> Result<ApiResponse, LibraryError> {
        self.require_author(author_id)?;
        let book = self
            .repository
            .book_for_author(author_id, id)
            .ok_or_else(|| not_found("book", id))?;
        self.repository.delete_book(&book)?;
        tracing::info!("Deleted book {} for author {}", id, author_id);
        Ok(ApiResponse::no_content())
    }
}
