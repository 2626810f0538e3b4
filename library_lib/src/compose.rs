//! Response envelope composition and the pagination header.

use library_api::types::{Link, PaginationMetadata, PAGINATION_HEADER};
use serde::Serialize;

use crate::error::LibraryError;
use crate::paging::Page;
use crate::shaping::{LinkedResource, Projection};

/// The one media type that switches responses into hypermedia mode.
pub const HATEOAS_MEDIA_TYPE: &str = "application/vnd.marvin.hateoas+json";

/// Binary representation switch derived from the `Accept` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Plain,
    Hypermedia,
}

impl MediaType {
    /// Exact comparison against [`HATEOAS_MEDIA_TYPE`]; anything else,
    /// including no value at all, is plain.
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(HATEOAS_MEDIA_TYPE) => MediaType::Hypermedia,
            _ => MediaType::Plain,
        }
    }

    pub fn is_hypermedia(&self) -> bool {
        matches!(self, MediaType::Hypermedia)
    }
}

/// Outer payload shape.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Envelope {
    Plain(Projection),
    PlainCollection(Vec<Projection>),
    Linked(LinkedResource),
    /// Item links live on each item; `links` holds the collection's own links.
    LinkedCollection {
        value: Vec<LinkedResource>,
        links: Vec<Link>,
    },
}

/// Merges projections and links into the envelope the media type asks for.
///
/// Links must be supplied exactly when the media type is hypermedia; any
/// other combination is an internally inconsistent envelope.
#[derive(Clone, Copy, Debug)]
pub struct ResponseComposer {
    media_type: MediaType,
}

impl ResponseComposer {
    pub fn new(media_type: MediaType) -> Self {
        Self { media_type }
    }

    pub fn from_accept(accept: Option<&str>) -> Self {
        Self::new(MediaType::from_accept(accept))
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Whether callers need to assemble links for this response.
    pub fn wants_links(&self) -> bool {
        self.media_type.is_hypermedia()
    }

    pub fn resource(
        &self,
        projection: Projection,
        links: Option<Vec<Link>>,
    ) -> Result<Envelope, LibraryError> {
        match (self.media_type, links) {
            (MediaType::Plain, None) => Ok(Envelope::Plain(projection)),
            (MediaType::Hypermedia, Some(links)) => {
                Ok(Envelope::Linked(projection.with_links(links)?))
            }
            (media_type, links) => Err(inconsistent(media_type, links.is_some())),
        }
    }

    /// `items` pairs each projection with its item-level links; `links` are
    /// the collection-level links.
    pub fn collection(
        &self,
        items: Vec<(Projection, Option<Vec<Link>>)>,
        links: Option<Vec<Link>>,
    ) -> Result<Envelope, LibraryError> {
        match (self.media_type, links) {
            (MediaType::Plain, None) => {
                let value = items
                    .into_iter()
                    .map(|(projection, item_links)| match item_links {
                        None => Ok(projection),
                        Some(_) => Err(inconsistent(MediaType::Plain, true)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Envelope::PlainCollection(value))
            }
            (MediaType::Hypermedia, Some(links)) => {
                let value = items
                    .into_iter()
                    .map(|(projection, item_links)| match item_links {
                        Some(item_links) => projection.with_links(item_links),
                        None => Err(inconsistent(MediaType::Hypermedia, false)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Envelope::LinkedCollection { value, links })
            }
            (media_type, links) => Err(inconsistent(media_type, links.is_some())),
        }
    }

    /// Pagination metadata for a collection page. Plain responses also get
    /// the previous/next page URIs since their body cannot carry links.
    pub fn pagination_metadata<T>(
        &self,
        page: &Page<T>,
        previous_page_link: Option<String>,
        next_page_link: Option<String>,
    ) -> PaginationMetadata {
        match self.media_type {
            MediaType::Hypermedia => PaginationMetadata::Counts(page.paging()),
            MediaType::Plain => PaginationMetadata::WithLinks {
                previous_page_link,
                next_page_link,
                paging: page.paging(),
            },
        }
    }

    /// Serialized pagination header as `(name, value)`, emitted for every
    /// collection response regardless of media type.
    pub fn pagination_header<T>(
        &self,
        page: &Page<T>,
        previous_page_link: Option<String>,
        next_page_link: Option<String>,
    ) -> Result<(&'static str, String), LibraryError> {
        let metadata = self.pagination_metadata(page, previous_page_link, next_page_link);
        Ok((PAGINATION_HEADER, serde_json::to_string(&metadata)?))
    }
}

fn inconsistent(media_type: MediaType, has_links: bool) -> LibraryError {
    let message = if has_links {
        format!("links supplied for a {:?} response", media_type)
    } else {
        format!("no links supplied for a {:?} response", media_type)
    };
    tracing::error!("Inconsistent envelope: {}", message);
    debug_assert!(false, "inconsistent envelope: {}", message);
    LibraryError::EnvelopeInvariant(message)
}
