//! Persisted filter state and its query-string location.
//!
//! Filters survive restarts as a location string such as
//! `/acme/admin/outgoing-contributions?searchTerm=foo&offset=20`. Only the
//! recognized keys are read or written; anything else in the query is dropped.

use std::fmt;
use url::form_urlencoded;

/// Query-string keys the list view understands.
pub const QUERY_FILTERS: [&str; 2] = ["searchTerm", "offset"];

/// User-controlled filters for the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text search, never empty when set
    pub search_term: Option<String>,
    /// Zero-based row offset of the current page
    pub offset: Option<u32>,
}

impl FilterState {
    /// Set the search term, treating blank input as no search.
    pub fn set_search_term(&mut self, term: &str) {
        let trimmed = term.trim();
        self.search_term = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }
}

/// Pick the recognized filters out of raw query pairs.
///
/// Unknown keys are dropped, `offset` is coerced to a number and values that
/// do not parse are omitted.
pub fn pick_query_filters<K, V, I>(pairs: I) -> FilterState
where
    K: AsRef<str>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut filters = FilterState::default();
    for (key, value) in pairs {
        let (key, value) = (key.as_ref(), value.as_ref());
        match key {
            "searchTerm" => filters.set_search_term(value),
            "offset" => match value.trim().parse::<u32>() {
                Ok(offset) => filters.offset = Some(offset),
                Err(_) => {
                    tracing::debug!(value, "ignoring non-numeric offset");
                    filters.offset = None;
                }
            },
            other => tracing::debug!(
                key = other,
                known = ?QUERY_FILTERS,
                "dropping unrecognized query key"
            ),
        }
    }
    filters
}

/// A path plus the filters encoded in its query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path without query string
    pub path: String,
    /// Recognized filters
    pub filters: FilterState,
}

impl Location {
    /// Create a location with no filters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filters: FilterState::default(),
        }
    }

    /// Parse `path?query`. The path part is kept as-is.
    pub fn parse(raw: &str) -> Self {
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };
        Self {
            path: path.to_string(),
            filters: pick_query_filters(form_urlencoded::parse(query.as_bytes())),
        }
    }

    /// Replace the query part, keeping the current path.
    pub fn with_query(&self, query: &str) -> Self {
        let query = query.trim_start_matches('?');
        Self {
            path: self.path.clone(),
            filters: pick_query_filters(form_urlencoded::parse(query.as_bytes())),
        }
    }

    /// Encoded query string without the leading `?`. Absent values are omitted.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(term) = &self.filters.search_term {
            serializer.append_pair("searchTerm", term);
        }
        if let Some(offset) = self.filters.offset {
            serializer.append_pair("offset", &offset.to_string());
        }
        serializer.finish()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.query_string();
        if query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, query)
        }
    }
}
