//! Field selection over client representations.
//!
//! A representation declares its field names up front through [`Shape`];
//! requested field lists are validated against that declaration before any
//! repository work and then applied as a pure transform. Matching is
//! case-insensitive but exact, and a projection always keeps the declared
//! field order no matter how the caller listed the fields.

use library_api::types::{AuthorDto, BookDto, Link};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::LibraryError;

/// Name of the slot hypermedia responses inject links into.
pub const LINKS_FIELD: &str = "links";

/// Implemented by every representation that can be shaped.
pub trait Shape {
    /// Declared field names, in declared order.
    fn declared_fields() -> &'static [&'static str];

    /// Every declared field with its value, in declared order.
    fn field_values(&self) -> Vec<(&'static str, Value)>;
}

impl Shape for AuthorDto {
    fn declared_fields() -> &'static [&'static str] {
        &["id", "firstName", "lastName", "genre"]
    }

    fn field_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::String(self.id.to_string())),
            ("firstName", Value::from(self.first_name.as_str())),
            ("lastName", Value::from(self.last_name.as_str())),
            ("genre", Value::from(self.genre.as_str())),
        ]
    }
}

impl Shape for BookDto {
    fn declared_fields() -> &'static [&'static str] {
        &["id", "title", "description", "authorId"]
    }

    fn field_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::String(self.id.to_string())),
            ("title", Value::from(self.title.as_str())),
            ("description", Value::from(self.description.clone())),
            ("authorId", Value::String(self.author_id.to_string())),
        ]
    }
}

/// A parsed, validated field list for one representation type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSelection {
    /// `None` selects every declared field.
    selected: Option<Vec<&'static str>>,
}

impl FieldSelection {
    /// Selects every declared field.
    pub fn all() -> Self {
        Self { selected: None }
    }

    /// Parses a comma-separated field list against `S`'s declared fields.
    ///
    /// Blank or absent input selects everything. Any entry that does not
    /// match a declared field, including an empty entry between commas,
    /// rejects the whole list.
    pub fn parse<S: Shape>(requested: Option<&str>) -> Result<Self, LibraryError> {
        let requested = match requested.map(str::trim) {
            Some(r) if !r.is_empty() => r,
            _ => return Ok(Self::all()),
        };

        let declared = S::declared_fields();
        let mut matched = Vec::new();
        for name in requested.split(',').map(str::trim) {
            let field = declared
                .iter()
                .find(|d| d.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    tracing::warn!("Rejecting field request {:?}: unknown field {:?}", requested, name);
                    LibraryError::InvalidFieldRequest {
                        requested: requested.to_string(),
                    }
                })?;
            matched.push(*field);
        }

        let selected = declared
            .iter()
            .copied()
            .filter(|d| matched.contains(d))
            .collect();
        Ok(Self {
            selected: Some(selected),
        })
    }

    /// Fields this selection keeps, in declared order.
    pub fn fields<S: Shape>(&self) -> Vec<&'static str> {
        match &self.selected {
            Some(selected) => selected.clone(),
            None => S::declared_fields().to_vec(),
        }
    }

    pub fn project<S: Shape>(&self, value: &S) -> Projection {
        let fields = value
            .field_values()
            .into_iter()
            .filter(|(name, _)| match &self.selected {
                Some(selected) => selected.contains(name),
                None => true,
            })
            .collect();
        Projection { fields }
    }
}

/// True when every requested field is declared by `S` (or none was requested).
pub fn validate_fields<S: Shape>(requested: Option<&str>) -> bool {
    FieldSelection::parse::<S>(requested).is_ok()
}

/// Shapes a single representation down to the requested fields.
pub fn project<S: Shape>(value: &S, requested: Option<&str>) -> Result<Projection, LibraryError> {
    Ok(FieldSelection::parse::<S>(requested)?.project(value))
}

/// Ordered field-name to value mapping produced by shaping.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    fields: Vec<(&'static str, Value)>,
}

impl Projection {
    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(k, _)| *k).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attaches item-level links under the reserved `links` slot.
    ///
    /// A representation declaring its own `links` field cannot be linked;
    /// that is a programming error. Debug builds panic, release builds
    /// report [`LibraryError::EnvelopeInvariant`].
    pub fn with_links(self, links: Vec<Link>) -> Result<LinkedResource, LibraryError> {
        let collision = self
            .fields
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(LINKS_FIELD));
        if collision {
            tracing::error!("Projection already declares a `{}` field", LINKS_FIELD);
            debug_assert!(!collision, "projection declares reserved field `{}`", LINKS_FIELD);
            return Err(LibraryError::EnvelopeInvariant(format!(
                "representation declares reserved field `{}`",
                LINKS_FIELD
            )));
        }
        Ok(LinkedResource {
            projection: self,
            links,
        })
    }
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A projection with its links merged in as a trailing `links` field.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkedResource {
    projection: Projection,
    links: Vec<Link>,
}

impl LinkedResource {
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Serialize for LinkedResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.projection.len() + 1))?;
        for (key, value) in &self.projection.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(LINKS_FIELD, &self.links)?;
        map.end()
    }
}

#[cfg(test)]
#[path = "shaping_tests.rs"]
mod tests;
