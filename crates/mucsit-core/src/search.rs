//! Search across every collection at once.

use serde::Serialize;
use tracing::{instrument, warn};

use crate::controller::fetch_list;
use crate::error::Error;
use crate::query::{ListQuery, QueryField};
use crate::resource::{Assignment, Blog, Note, OldQuestion, Resource};
use crate::routes;
use crate::traits::Backend;
use crate::types::{PageSize, ResourceId, ResourceKind};

/// One match, linking to its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: ResourceId,
    pub title: String,
    pub kind: ResourceKind,
    pub href: String,
}

/// Hits from every collection that answered, plus the collections that failed.
#[derive(Debug, Default)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub failures: Vec<(ResourceKind, Error)>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Search all four collections concurrently with the backend's `search`
/// parameter, taking the first `per_kind` matches of each.
///
/// A blank term returns no hits without issuing any request. A collection
/// that fails is reported in `failures` and does not affect the others.
#[instrument(skip(backend))]
pub async fn search_all<B>(backend: &B, term: &str, per_kind: PageSize) -> SearchResults
where
    B: Backend + ?Sized,
{
    let term = term.trim();
    if term.is_empty() {
        return SearchResults::default();
    }

    let (notes, assignments, questions, blogs) = futures_util::join!(
        search_kind::<Note, B>(backend, term, per_kind),
        search_kind::<Assignment, B>(backend, term, per_kind),
        search_kind::<OldQuestion, B>(backend, term, per_kind),
        search_kind::<Blog, B>(backend, term, per_kind),
    );

    let mut results = SearchResults::default();
    for (kind, outcome) in [
        (ResourceKind::Notes, notes),
        (ResourceKind::Assignments, assignments),
        (ResourceKind::OldQuestions, questions),
        (ResourceKind::Blogs, blogs),
    ] {
        match outcome {
            Ok(hits) => results.hits.extend(hits),
            Err(e) => {
                warn!(%kind, error = %e, "Search failed for collection");
                results.failures.push((kind, e));
            }
        }
    }
    results
}

async fn search_kind<R, B>(backend: &B, term: &str, per_kind: PageSize) -> Result<Vec<SearchHit>, Error>
where
    R: Resource,
    B: Backend + ?Sized,
{
    let query = ListQuery::<R::Sort>::new()
        .with(QueryField::PageSize(per_kind))?
        .with(QueryField::Search(Some(term.to_string())))?;
    let page = fetch_list::<R, B>(backend, &query).await?;

    Ok(page
        .items
        .iter()
        .map(|item| SearchHit {
            id: item.id().clone(),
            title: item.title().to_string(),
            kind: R::KIND,
            href: routes::detail_path(R::KIND, item.id()),
        })
        .collect())
}
