//! mucsit-core - Types, controllers, and traits for the MUCSIT resource portal.
//!
//! The portal browses four collections (notes, assignments, old exam
//! questions, blog articles) served by a REST backend. This crate holds the
//! backend-agnostic part: resource models, query construction, envelope
//! normalization, the paginated list controller, the detail resolver, and
//! the pagination widget. HTTP lives in `mucsit-http` behind the
//! [`Backend`] trait.

pub mod controller;
pub mod detail;
pub mod envelope;
pub mod error;
pub mod facets;
pub mod pagination;
pub mod query;
pub mod resource;
pub mod routes;
pub mod search;
pub mod sort;
pub mod traits;
pub mod types;

pub use controller::{Applied, FetchOutcome, FetchTicket, ListController, ListStatus, fetch_list};
pub use detail::{DetailPage, DetailResolver, Lookup, PageMeta, SharePayload, fetch_by_id};
pub use envelope::ListResult;
pub use error::Error;
pub use facets::{Facet, FacetSet};
pub use pagination::{PaginationEvent, PaginationWidget};
pub use query::{ListQuery, QueryField, QueryParams, build_query_params};
pub use resource::{Assignment, Author, Blog, Difficulty, Note, OldQuestion, Resource};
pub use search::{SearchHit, SearchResults, search_all};
pub use sort::{AssignmentSort, BlogSort, NoteSort, OldQuestionSort, SortKey, SortOption};
pub use traits::Backend;
pub use types::{ApiUrl, PageSize, ResourceId, ResourceKind, SiteUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
