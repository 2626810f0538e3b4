use url::Url;

use super::{
    common::{PagingPolicy, QueryCommon},
    Query,
};

/// Query parameters accepted by the authors collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorsQuery {
    pub common: QueryCommon,
    pub search_query: Option<String>,
    pub genre: Option<String>,
}

impl Query for AuthorsQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_fields_to_url(url);
        if let Some(search_query) = &self.search_query {
            url.query_pairs_mut()
                .append_pair("searchQuery", search_query.as_str());
        };
        if let Some(genre) = &self.genre {
            url.query_pairs_mut().append_pair("genre", genre.as_str());
        };
        self.common.add_paging_to_url(&url)
    }
}

impl AuthorsQuery {
    pub fn with_search(mut self, search_query: &str) -> Self {
        self.search_query = Some(search_query.to_string());
        self
    }

    pub fn with_genre(mut self, genre: &str) -> Self {
        self.genre = Some(genre.to_string());
        self
    }

    /// Returns the query with paging clamped and blank filters removed.
    pub fn normalized(&self, policy: &PagingPolicy) -> AuthorsQuery {
        AuthorsQuery {
            common: self.common.normalized(policy),
            search_query: non_blank(self.search_query.as_deref()),
            genre: non_blank(self.genre.as_deref()),
        }
    }

    /// Same query positioned at another page.
    pub fn at_page(&self, page_number: i64) -> AuthorsQuery {
        self.clone().with_page(page_number)
    }

    /// Rebuilds a query from the parameters of a collection URL.
    ///
    /// Unparseable numbers fall back to the defaults, matching how
    /// out-of-range values are treated.
    pub fn from_url(url: &Url) -> AuthorsQuery {
        let mut query = AuthorsQuery::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "fields" => query.common.fields = Some(value.into_owned()),
                "searchQuery" => query.search_query = Some(value.into_owned()),
                "genre" => query.genre = Some(value.into_owned()),
                "pageNumber" => {
                    query.common.page_number = value.parse().unwrap_or(query.common.page_number)
                }
                "pageSize" => {
                    query.common.page_size = value.parse().unwrap_or(query.common.page_size)
                }
                _ => {}
            }
        }
        query
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
