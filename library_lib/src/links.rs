//! Hypermedia link assembly for single resources and collection pages.
//!
//! Links are rebuilt on every call from the route table and the inputs;
//! nothing is cached. Order is fixed: `self` first, then the relation links,
//! then page navigation.

use library_api::types::{AuthorID, BookID, Link, Method};
use library_api::{AuthorsQuery, Query, Route, RouteValues, UrlBuilder};

use crate::error::LibraryError;
use crate::paging::Page;

/// Which page of a collection a URI should point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceUriType {
    PreviousPage,
    NextPage,
    Current,
}

pub struct LinkAssembler<'a, U: UrlBuilder + ?Sized> {
    urls: &'a U,
}

impl<'a, U: UrlBuilder + ?Sized> LinkAssembler<'a, U> {
    pub fn new(urls: &'a U) -> Self {
        Self { urls }
    }

    fn link(
        &self,
        route: Route,
        values: &RouteValues,
        rel: &str,
        method: Method,
    ) -> Result<Link, LibraryError> {
        Ok(Link::new(self.urls.link(route, values)?, rel, method))
    }

    /// Links for a single author. The `fields` parameter is carried into
    /// the `self` link only when one was supplied.
    pub fn for_author(
        &self,
        id: AuthorID,
        fields: Option<&str>,
    ) -> Result<Vec<Link>, LibraryError> {
        let fields = fields.map(str::trim).filter(|f| !f.is_empty());
        Ok(vec![
            self.link(
                Route::GetAuthor,
                &RouteValues::new().with("id", id).with_opt("fields", fields),
                "self",
                Method::Get,
            )?,
            self.link(
                Route::DeleteAuthor,
                &RouteValues::new().with("id", id),
                "delete_author",
                Method::Delete,
            )?,
            self.link(
                Route::CreateBookForAuthor,
                &RouteValues::new().with("authorId", id),
                "create_book_for_author",
                Method::Post,
            )?,
            self.link(
                Route::GetBooksForAuthor,
                &RouteValues::new().with("authorId", id),
                "books",
                Method::Get,
            )?,
        ])
    }

    /// Navigation links for a page of authors: `self`, then `nextPage` and
    /// `previousPage` when those pages exist.
    ///
    /// `query` must already be normalized; every filter, field and size
    /// parameter is carried verbatim so following the chain reproduces the
    /// same filtered, ordered set.
    pub fn for_authors<T>(
        &self,
        query: &AuthorsQuery,
        page: &Page<T>,
    ) -> Result<Vec<Link>, LibraryError> {
        let mut links = vec![Link::new(
            self.authors_page_uri(query, page, ResourceUriType::Current)?,
            "self",
            Method::Get,
        )];
        if page.has_next() {
            links.push(Link::new(
                self.authors_page_uri(query, page, ResourceUriType::NextPage)?,
                "nextPage",
                Method::Get,
            ));
        }
        if page.has_previous() {
            links.push(Link::new(
                self.authors_page_uri(query, page, ResourceUriType::PreviousPage)?,
                "previousPage",
                Method::Get,
            ));
        }
        Ok(links)
    }

    /// URI of the current, next or previous page of the authors collection.
    ///
    /// Page numbers are taken relative to the page actually served, which
    /// differs from the requested one when it was clamped.
    pub fn authors_page_uri<T>(
        &self,
        query: &AuthorsQuery,
        page: &Page<T>,
        kind: ResourceUriType,
    ) -> Result<String, LibraryError> {
        let current = page.current_page() as i64;
        let page_number = match kind {
            ResourceUriType::PreviousPage => current - 1,
            ResourceUriType::NextPage => current + 1,
            ResourceUriType::Current => current,
        };
        let base = self.urls.build_url(Route::GetAuthors, &RouteValues::new())?;
        Ok(query.at_page(page_number).add_to_url(&base).to_string())
    }

    /// Links for a single book of an author.
    pub fn for_book(&self, author_id: AuthorID, id: BookID) -> Result<Vec<Link>, LibraryError> {
        let values = RouteValues::new().with("authorId", author_id).with("id", id);
        Ok(vec![
            self.link(Route::GetBookForAuthor, &values, "self", Method::Get)?,
            self.link(Route::DeleteBookForAuthor, &values, "delete_book", Method::Delete)?,
            self.link(Route::UpdateBookForAuthor, &values, "update_book", Method::Put)?,
            self.link(
                Route::PartialUpdateBookForAuthor,
                &values,
                "partial_update_book",
                Method::Patch,
            )?,
        ])
    }

    /// Collection-level links for an author's books.
    pub fn for_books(&self, author_id: AuthorID) -> Result<Vec<Link>, LibraryError> {
        Ok(vec![self.link(
            Route::GetBooksForAuthor,
            &RouteValues::new().with("authorId", author_id),
            "self",
            Method::Get,
        )?])
    }
}

#[cfg(test)]
mod tests {
    use library_api::{PagingPolicy, RouteTable};
    use url::Url;
    use uuid::Uuid;

    use super::*;
    use crate::paging::PageRequest;

    fn table() -> RouteTable {
        RouteTable::new("http://localhost:5000").unwrap()
    }

    fn page_of(total: u64, query: &AuthorsQuery) -> Page<u64> {
        Page::create((0..total).collect(), PageRequest::from_common(&query.common))
    }

    fn rels(links: &[Link]) -> Vec<&str> {
        links.iter().map(|l| l.rel.as_str()).collect()
    }

    #[test]
    fn author_links_in_order() {
        let table = table();
        let id = Uuid::from_u128(42);
        let links = LinkAssembler::new(&table).for_author(id, None).unwrap();
        assert_eq!(
            rels(&links),
            vec!["self", "delete_author", "create_book_for_author", "books"]
        );
        assert_eq!(
            links[0].href,
            format!("http://localhost:5000/api/authors/{}", id)
        );
        assert_eq!(links[1].method, Method::Delete);
        assert_eq!(
            links[2].href,
            format!("http://localhost:5000/api/authors/{}/books", id)
        );
        assert_eq!(links[2].method, Method::Post);
        assert_eq!(links[3].method, Method::Get);
    }

    #[test]
    fn author_self_link_carries_fields_only_when_supplied() {
        let table = table();
        let id = Uuid::from_u128(42);
        let assembler = LinkAssembler::new(&table);
        let with = assembler.for_author(id, Some("id,genre")).unwrap();
        assert!(with[0].href.ends_with("?fields=id%2Cgenre"));
        assert!(!with[1].href.contains("fields"));

        let blank = assembler.for_author(id, Some("  ")).unwrap();
        assert!(!blank[0].href.contains('?'));
    }

    #[test]
    fn book_links_in_order() {
        let table = table();
        let links = LinkAssembler::new(&table)
            .for_book(Uuid::from_u128(1), Uuid::from_u128(2))
            .unwrap();
        assert_eq!(
            rels(&links),
            vec!["self", "delete_book", "update_book", "partial_update_book"]
        );
        let methods: Vec<Method> = links.iter().map(|l| l.method).collect();
        assert_eq!(
            methods,
            vec![Method::Get, Method::Delete, Method::Put, Method::Patch]
        );
        assert!(links.iter().all(|l| l.href == links[0].href));
    }

    #[test]
    fn books_collection_has_single_self_link() {
        let table = table();
        let author_id = Uuid::from_u128(1);
        let links = LinkAssembler::new(&table).for_books(author_id).unwrap();
        assert_eq!(rels(&links), vec!["self"]);
        assert_eq!(
            links[0].href,
            format!("http://localhost:5000/api/authors/{}/books", author_id)
        );
    }

    #[test]
    fn middle_page_has_next_and_previous() {
        let table = table();
        let query = AuthorsQuery::default()
            .with_page(2)
            .normalized(&PagingPolicy::default());
        let page = page_of(25, &query);
        let links = LinkAssembler::new(&table).for_authors(&query, &page).unwrap();
        assert_eq!(rels(&links), vec!["self", "nextPage", "previousPage"]);
        assert_eq!(
            links[0].href,
            "http://localhost:5000/api/authors?pageNumber=2&pageSize=10"
        );
        assert_eq!(
            links[1].href,
            "http://localhost:5000/api/authors?pageNumber=3&pageSize=10"
        );
        assert_eq!(
            links[2].href,
            "http://localhost:5000/api/authors?pageNumber=1&pageSize=10"
        );
    }

    #[test]
    fn single_page_has_only_self() {
        let table = table();
        let query = AuthorsQuery::default().normalized(&PagingPolicy::default());
        let page = page_of(4, &query);
        let links = LinkAssembler::new(&table).for_authors(&query, &page).unwrap();
        assert_eq!(rels(&links), vec!["self"]);
    }

    #[test]
    fn empty_collection_has_only_self() {
        let table = table();
        let query = AuthorsQuery::default().normalized(&PagingPolicy::default());
        let page = page_of(0, &query);
        let links = LinkAssembler::new(&table).for_authors(&query, &page).unwrap();
        assert_eq!(rels(&links), vec!["self"]);
    }

    #[test]
    fn navigation_preserves_every_parameter() {
        let table = table();
        let query = AuthorsQuery::default()
            .with_fields("id,firstName")
            .with_search("r")
            .with_genre("Fantasy")
            .with_page(2)
            .with_page_size(3)
            .normalized(&PagingPolicy::default());
        let page = page_of(10, &query);
        let links = LinkAssembler::new(&table).for_authors(&query, &page).unwrap();
        for link in &links {
            let parsed = AuthorsQuery::from_url(&Url::parse(&link.href).unwrap());
            assert_eq!(parsed.common.fields.as_deref(), Some("id,firstName"));
            assert_eq!(parsed.search_query.as_deref(), Some("r"));
            assert_eq!(parsed.genre.as_deref(), Some("Fantasy"));
            assert_eq!(parsed.common.page_size, 3);
        }
    }

    #[test]
    fn next_then_previous_reproduces_self() {
        let table = table();
        let policy = PagingPolicy::default();
        let assembler = LinkAssembler::new(&table);
        let query = AuthorsQuery::default()
            .with_genre("Horror")
            .with_page(1)
            .with_page_size(4)
            .normalized(&policy);
        let page = page_of(13, &query);
        let links = assembler.for_authors(&query, &page).unwrap();
        let next = &links[1];
        assert_eq!(next.rel, "nextPage");

        let next_query = AuthorsQuery::from_url(&Url::parse(&next.href).unwrap()).normalized(&policy);
        let next_page = page_of(13, &next_query);
        let next_links = assembler.for_authors(&next_query, &next_page).unwrap();
        let previous = next_links.iter().find(|l| l.rel == "previousPage").unwrap();

        let back_query =
            AuthorsQuery::from_url(&Url::parse(&previous.href).unwrap()).normalized(&policy);
        let back_page = page_of(13, &back_query);
        let back_links = assembler.for_authors(&back_query, &back_page).unwrap();
        assert_eq!(back_links[0].href, links[0].href);
    }

    #[test]
    fn clamped_page_links_are_relative_to_served_page() {
        let table = table();
        let query = AuthorsQuery::default()
            .with_page(99)
            .normalized(&PagingPolicy::default());
        let page = page_of(25, &query);
        let links = LinkAssembler::new(&table).for_authors(&query, &page).unwrap();
        assert_eq!(rels(&links), vec!["self", "previousPage"]);
        assert!(links[0].href.contains("pageNumber=3"));
        assert!(links[1].href.contains("pageNumber=2"));
    }
}
