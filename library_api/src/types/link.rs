use serde::{Deserialize, Serialize};

/// HTTP verb a link is meant to be followed with.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "PATCH")]
    Patch,
    #[serde(rename = "DELETE")]
    Delete,
}
impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Method::Get => "GET",
                Method::Post => "POST",
                Method::Put => "PUT",
                Method::Patch => "PATCH",
                Method::Delete => "DELETE",
            }
        )
    }
}

/// A navigation link embedded in hypermedia responses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Absolute URL of the target.
    pub href: String,
    /// Relation name, e.g. `self` or `delete_author`.
    pub rel: String,
    pub method: Method,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: &str, method: Method) -> Self {
        Self {
            href: href.into(),
            rel: rel.to_string(),
            method,
        }
    }
}
