use library_api::types::{AuthorDto, AuthorForCreation, AuthorID};
use library_api::{AuthorsQuery, Route, RouteValues, UrlBuilder};
use uuid::Uuid;

use super::{not_found, ApiResponse, LibraryService};
use crate::compose::ResponseComposer;
use crate::entities::{Author, Book};
use crate::error::LibraryError;
use crate::links::{LinkAssembler, ResourceUriType};
use crate::repository::Repository;
use crate::shaping::FieldSelection;
use crate::validation::{validate_author_for_creation, validate_genre, validate_search};

impl<R: Repository, U: UrlBuilder> LibraryService<R, U> {
    /// `GET /api/authors`
    pub fn get_authors(
        &self,
        query: &AuthorsQuery,
        accept: Option<&str>,
    ) -> Result<ApiResponse, LibraryError> {
        let selection = FieldSelection::parse::<AuthorDto>(query.common.fields.as_deref())?;

        let mut query = query.normalized(&self.policy);
        query.search_query = validate_search(query.search_query.as_deref())?;
        query.genre = validate_genre(query.genre.as_deref())?;

        let page = self.repository.authors(&query);
        tracing::debug!(
            "Serving authors page {}/{} ({} total)",
            page.current_page(),
            page.total_pages(),
            page.total_count()
        );

        let composer = ResponseComposer::from_accept(accept);
        let assembler = LinkAssembler::new(&self.urls);
        let fields = query.common.fields.as_deref();

        let (previous, next) = if composer.wants_links() {
            (None, None)
        } else {
            let previous = if page.has_previous() {
                Some(assembler.authors_page_uri(&query, &page, ResourceUriType::PreviousPage)?)
            } else {
                None
            };
            let next = if page.has_next() {
                Some(assembler.authors_page_uri(&query, &page, ResourceUriType::NextPage)?)
            } else {
                None
            };
            (previous, next)
        };
        let header = composer.pagination_header(&page, previous, next)?;

        let items = page
            .items()
            .iter()
            .map(|author| -> Result<_, LibraryError> {
                let projection = selection.project(&AuthorDto::from(author));
                let links = if composer.wants_links() {
                    Some(assembler.for_author(author.id, fields)?)
                } else {
                    None
                };
                Ok((projection, links))
            })
            .collect::<Result<Vec<_>, LibraryError>>()?;
        let links = if composer.wants_links() {
            Some(assembler.for_authors(&query, &page)?)
        } else {
            None
        };

        let envelope = composer.collection(items, links)?;
        Ok(ApiResponse::ok(serde_json::to_value(&envelope)?).with_header(header))
    }

    /// `GET /api/authors/{id}`
    pub fn get_author(
        &self,
        id: AuthorID,
        fields: Option<&str>,
        accept: Option<&str>,
    ) -> Result<ApiResponse, LibraryError> {
        let selection = FieldSelection::parse::<AuthorDto>(fields)?;
        let author = self
            .repository
            .author(id)
            .ok_or_else(|| not_found("author", id))?;

        let composer = ResponseComposer::from_accept(accept);
        let links = if composer.wants_links() {
            Some(LinkAssembler::new(&self.urls).for_author(id, fields)?)
        } else {
            None
        };
        let envelope = composer.resource(selection.project(&AuthorDto::from(author)), links)?;
        Ok(ApiResponse::ok(serde_json::to_value(&envelope)?))
    }

    /// `POST /api/authors`, optionally with nested books.
    pub fn create_author(
        &self,
        body: Option<AuthorForCreation>,
        accept: Option<&str>,
    ) -> Result<ApiResponse, LibraryError> {
        let body = body.ok_or_else(|| LibraryError::BadRequest("author body is required".into()))?;
        validate_author_for_creation(&body)?;

        let author = Author::from_creation(Uuid::new_v4(), &body);
        self.repository.add_author(author.clone())?;
        for book in &body.books {
            self.repository
                .add_book_for_author(author.id, Book::from_creation(Uuid::nil(), author.id, book))?;
        }
        tracing::info!("Created author {} with {} books", author.id, body.books.len());

        let composer = ResponseComposer::from_accept(accept);
        let links = if composer.wants_links() {
            Some(LinkAssembler::new(&self.urls).for_author(author.id, None)?)
        } else {
            None
        };
        let envelope = composer.resource(FieldSelection::all().project(&AuthorDto::from(&author)), links)?;
        let location = self
            .urls
            .link(Route::GetAuthor, &RouteValues::new().with("id", author.id))?;
        Ok(ApiResponse::created(location, serde_json::to_value(&envelope)?))
    }

    /// `POST /api/authors/{id}`: creating at a chosen id is never allowed.
    pub fn block_author_creation(&self, id: AuthorID) -> Result<ApiResponse, LibraryError> {
        if self.repository.author_exists(id) {
            return Err(LibraryError::Conflict(format!("author {} already exists", id)));
        }
        Err(not_found("author", id))
    }

    /// `DELETE /api/authors/{id}`
    pub fn delete_author(&self, id: AuthorID) -> Result<ApiResponse, LibraryError> {
        if !self.repository.author_exists(id) {
            return Err(not_found("author", id));
        }
        self.repository.delete_author(id)?;
        tracing::info!("Deleted author {}", id);
        Ok(ApiResponse::no_content())
    }
}
