//! List queries and query-string construction.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, InvalidInputError};
use crate::facets::Facet;
use crate::sort::SortKey;
use crate::types::PageSize;

/// Ordered query parameters. `None` and empty-string values are dropped when
/// the query string is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Absent values are kept here and skipped on output.
    pub fn push(&mut self, key: impl Into<String>, value: Option<impl ToString>) -> &mut Self {
        self.pairs.push((key.into(), value.map(|v| v.to_string())));
        self
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.push(key, value);
        self
    }

    /// Parameters that will actually be sent, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().filter_map(|(k, v)| match v.as_deref() {
            Some(v) if !v.is_empty() => Some((k.as_str(), v)),
            _ => None,
        })
    }

    /// Value of the first present parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.present().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn to_query_string(&self) -> String {
        build_query_params(self.present())
    }
}

impl Serialize for QueryParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.present())
    }
}

/// Build a form-encoded query string from key/value pairs, skipping pairs
/// whose value is empty. Absent values never produce a bare `key=`.
///
/// # Example
///
/// ```
/// use mucsit_core::query::QueryParams;
///
/// let params = QueryParams::new()
///     .with("page", Some(1))
///     .with("limit", Some(10))
///     .with("search", Some(""))
///     .with("subject", None::<&str>);
/// assert_eq!(params.to_query_string(), "page=1&limit=10");
/// ```
pub fn build_query_params<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if !value.is_empty() {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// One field of a [`ListQuery`], carrying its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryField<S> {
    Page(u32),
    PageSize(PageSize),
    Sort(S),
    /// Search text; blank text clears the search.
    Search(Option<String>),
    /// Select a facet value, or clear the facet with `None`.
    Filter(Facet, Option<String>),
}

impl<S> QueryField<S> {
    /// Every field except the page itself sends the user back to page 1.
    pub fn resets_page(&self) -> bool {
        !matches!(self, QueryField::Page(_))
    }
}

/// Parameters of one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<S> {
    page: u32,
    page_size: PageSize,
    sort: S,
    search: Option<String>,
    filters: BTreeMap<Facet, String>,
}

impl<S: SortKey> Default for ListQuery<S> {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            sort: S::default(),
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl<S: SortKey> ListQuery<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn sort(&self) -> S {
        self.sort
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Selected value for `facet`, if any.
    pub fn filter(&self, facet: Facet) -> Option<&str> {
        self.filters.get(&facet).map(String::as_str)
    }

    pub fn filters(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.filters.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Apply one field change.
    ///
    /// Returns `Ok(true)` if the query changed. Any change other than the
    /// page number also resets the page to 1.
    ///
    /// # Errors
    ///
    /// Returns an error for page 0; the query is left untouched.
    pub fn set(&mut self, field: QueryField<S>) -> Result<bool, Error> {
        let resets_page = field.resets_page();
        let changed = match field {
            QueryField::Page(page) => {
                if page == 0 {
                    return Err(InvalidInputError::Page { page }.into());
                }
                replace(&mut self.page, page)
            }
            QueryField::PageSize(size) => replace(&mut self.page_size, size),
            QueryField::Sort(sort) => replace(&mut self.sort, sort),
            QueryField::Search(text) => replace(&mut self.search, normalize(text)),
            QueryField::Filter(facet, value) => match normalize(value) {
                Some(value) => self.filters.insert(facet, value.clone()).as_ref() != Some(&value),
                None => self.filters.remove(&facet).is_some(),
            },
        };

        if changed && resets_page {
            self.page = 1;
        }
        Ok(changed)
    }

    /// Builder-style [`set`](Self::set) for constructing queries up front.
    pub fn with(mut self, field: QueryField<S>) -> Result<Self, Error> {
        self.set(field)?;
        Ok(self)
    }

    /// Map the query onto backend parameter names.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new()
            .with("page", Some(self.page))
            .with("limit", Some(self.page_size.get()))
            .with("sort", Some(self.sort.as_param()))
            .with("search", self.search.as_deref());
        for (facet, value) in &self.filters {
            params.push(facet.param(), Some(value));
        }
        params
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn normalize(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
