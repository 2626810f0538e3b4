//! Route-name to URL resolution.

use url::Url;

use crate::Error;

/// Every named route a link can point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    GetAuthors,
    GetAuthor,
    CreateAuthor,
    DeleteAuthor,
    GetBooksForAuthor,
    GetBookForAuthor,
    CreateBookForAuthor,
    UpdateBookForAuthor,
    PartialUpdateBookForAuthor,
    DeleteBookForAuthor,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::GetAuthors => "GetAuthors",
            Route::GetAuthor => "GetAuthor",
            Route::CreateAuthor => "CreateAuthor",
            Route::DeleteAuthor => "DeleteAuthor",
            Route::GetBooksForAuthor => "GetBooksForAuthor",
            Route::GetBookForAuthor => "GetBookForAuthor",
            Route::CreateBookForAuthor => "CreateBookForAuthor",
            Route::UpdateBookForAuthor => "UpdateBookForAuthor",
            Route::PartialUpdateBookForAuthor => "PartialUpdateBookForAuthor",
            Route::DeleteBookForAuthor => "DeleteBookForAuthor",
        }
    }

    /// Path template; `{key}` segments are filled from route values.
    pub fn template(&self) -> &'static str {
        match self {
            Route::GetAuthors | Route::CreateAuthor => "/api/authors",
            Route::GetAuthor | Route::DeleteAuthor => "/api/authors/{id}",
            Route::GetBooksForAuthor | Route::CreateBookForAuthor => {
                "/api/authors/{authorId}/books"
            }
            Route::GetBookForAuthor
            | Route::UpdateBookForAuthor
            | Route::PartialUpdateBookForAuthor
            | Route::DeleteBookForAuthor => "/api/authors/{authorId}/books/{id}",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered route parameters. Values not consumed by the path template are
/// emitted as query parameters in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteValues {
    values: Vec<(&'static str, String)>,
}

impl RouteValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.values.push((key, value.to_string()));
        self
    }

    /// Adds the value only when present, so absent parameters leave no trace.
    pub fn with_opt(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Resolves a named route plus parameters into an absolute URL.
///
/// Implementations must be deterministic: the same route and values always
/// produce the same URL.
pub trait UrlBuilder {
    fn build_url(&self, route: Route, values: &RouteValues) -> Result<Url, Error>;

    /// Convenience wrapper returning the URL as a string.
    fn link(&self, route: Route, values: &RouteValues) -> Result<String, Error> {
        Ok(self.build_url(route, values)?.to_string())
    }
}

/// [`UrlBuilder`] backed by the static route templates and a base URL.
#[derive(Clone, Debug)]
pub struct RouteTable {
    base_url: Url,
}

impl RouteTable {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", base_url, e);
            Error::InvalidBaseUrl(format!("{}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl UrlBuilder for RouteTable {
    fn build_url(&self, route: Route, values: &RouteValues) -> Result<Url, Error> {
        let mut consumed = Vec::new();
        let mut path = String::new();
        for segment in route.template().split('/').filter(|s| !s.is_empty()) {
            path.push('/');
            match segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                Some(key) => {
                    let (key, value) = values
                        .iter()
                        .find(|(k, _)| *k == key)
                        .ok_or(Error::MissingRouteValue {
                            route: route.name(),
                            key,
                        })?;
                    consumed.push(key);
                    path.push_str(value);
                }
                None => path.push_str(segment),
            }
        }

        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}{}", prefix, path));
        url.set_query(None);
        url.set_fragment(None);

        let extra: Vec<(&str, &str)> = values
            .iter()
            .filter(|(k, _)| !consumed.contains(k))
            .collect();
        if !extra.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in extra {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
