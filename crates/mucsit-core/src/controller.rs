//! Paginated list controller.
//!
//! A [`ListController`] owns the state of one list view: the current query,
//! the last page that loaded, the facets derived from it, and the last error.
//! It is written once and instantiated per resource kind.
//!
//! Fetching is split in two so overlapping requests can be ordered:
//! every query change hands back a [`FetchTicket`] stamped with a sequence
//! number; the view runs the ticket however it likes (inline or spawned) and
//! feeds the [`FetchOutcome`] back through [`ListController::apply`]. Only the
//! outcome of the most recently issued ticket is applied; anything older is
//! discarded without touching state.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument, trace, warn};

use crate::envelope::{ListResult, normalize_list};
use crate::error::Error;
use crate::facets::{self, FacetSet};
use crate::pagination::{PaginationEvent, PaginationWidget};
use crate::query::{ListQuery, QueryField};
use crate::resource::Resource;
use crate::traits::Backend;

/// Fetch one page of `R` for `query`.
#[instrument(skip(backend, query), fields(kind = %R::KIND, page = query.page()))]
pub async fn fetch_list<R, B>(backend: &B, query: &ListQuery<R::Sort>) -> Result<ListResult<R>, Error>
where
    R: Resource,
    B: Backend + ?Sized,
{
    let endpoint = R::KIND.collection_endpoint();
    let params = query.to_params();
    trace!(query = %params.to_query_string(), "Fetching list");

    let body = backend.request(&endpoint, &params).await?;
    let result = normalize_list::<R>(&endpoint, query.page(), body)?;

    debug!(
        items = result.items.len(),
        total_pages = result.total_pages,
        "List page loaded"
    );
    Ok(result)
}

/// What the view should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListStatus {
    /// Nothing has been requested yet.
    NotLoaded,
    /// The latest request is still in flight.
    Loading,
    /// The latest request succeeded with at least one item.
    Loaded,
    /// The latest request succeeded with no items.
    NoResults,
    /// The latest request failed. Previously loaded items are still available.
    Failed,
}

/// Whether an outcome was applied or dropped as superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

/// A request issued by a controller, waiting to be run.
#[must_use = "a fetch ticket does nothing until it is run and applied"]
pub struct FetchTicket<R: Resource, B> {
    seq: u64,
    query: ListQuery<R::Sort>,
    backend: Arc<B>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, B: Backend> FetchTicket<R, B> {
    /// Sequence number assigned at issue time.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Query this ticket will send.
    pub fn query(&self) -> &ListQuery<R::Sort> {
        &self.query
    }

    /// Perform the request.
    pub async fn run(self) -> FetchOutcome<R> {
        let result = fetch_list::<R, B>(&self.backend, &self.query).await;
        FetchOutcome {
            seq: self.seq,
            result,
        }
    }
}

impl<R: Resource, B> std::fmt::Debug for FetchTicket<R, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchTicket")
            .field("kind", &R::KIND)
            .field("seq", &self.seq)
            .field("query", &self.query)
            .finish()
    }
}

/// A completed request, ready to be applied.
#[derive(Debug)]
pub struct FetchOutcome<R> {
    seq: u64,
    result: Result<ListResult<R>, Error>,
}

impl<R> FetchOutcome<R> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn result(&self) -> &Result<ListResult<R>, Error> {
        &self.result
    }
}

/// State of one list view.
pub struct ListController<R: Resource, B> {
    backend: Arc<B>,
    query: ListQuery<R::Sort>,
    result: Option<ListResult<R>>,
    facets: FacetSet,
    error: Option<Error>,
    /// Sequence number of the most recently issued ticket.
    issued: u64,
    /// Sequence number of the most recently applied outcome.
    settled: u64,
}

impl<R: Resource, B: Backend> ListController<R, B> {
    /// Create a controller with the default query for `R`.
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_query(backend, ListQuery::default())
    }

    pub fn with_query(backend: Arc<B>, query: ListQuery<R::Sort>) -> Self {
        Self {
            backend,
            query,
            result: None,
            facets: FacetSet::default(),
            error: None,
            issued: 0,
            settled: 0,
        }
    }

    /// Issue the initial fetch.
    pub fn mount(&mut self) -> FetchTicket<R, B> {
        self.refetch()
    }

    /// Issue a fetch for the current query, superseding any in flight.
    pub fn refetch(&mut self) -> FetchTicket<R, B> {
        self.issued += 1;
        debug!(kind = %R::KIND, seq = self.issued, "Issuing fetch");
        FetchTicket {
            seq: self.issued,
            query: self.query.clone(),
            backend: Arc::clone(&self.backend),
            _resource: PhantomData,
        }
    }

    /// Change one query field.
    ///
    /// Returns a ticket for the refetch the change requires, or `None` if the
    /// field already held that value. Changing anything but the page resets
    /// the page to 1.
    ///
    /// # Errors
    ///
    /// Rejects page 0 without changing the query.
    pub fn set_query_field(
        &mut self,
        field: QueryField<R::Sort>,
    ) -> Result<Option<FetchTicket<R, B>>, Error> {
        trace!(kind = %R::KIND, ?field, "Query field change");
        if self.query.set(field)? {
            Ok(Some(self.refetch()))
        } else {
            Ok(None)
        }
    }

    /// Translate a pagination widget event into a query change.
    pub fn handle(
        &mut self,
        event: PaginationEvent<R::Sort>,
    ) -> Result<Option<FetchTicket<R, B>>, Error> {
        self.set_query_field(event.into())
    }

    /// Apply a completed fetch if it belongs to the latest issued ticket.
    ///
    /// On success the page, facets, and error are replaced. On failure the
    /// previous page and facets stay in place and the error is recorded.
    pub fn apply(&mut self, outcome: FetchOutcome<R>) -> Applied {
        if outcome.seq != self.issued {
            debug!(
                kind = %R::KIND,
                seq = outcome.seq,
                latest = self.issued,
                "Discarding superseded fetch"
            );
            return Applied::Stale;
        }

        self.settled = outcome.seq;
        match outcome.result {
            Ok(result) => {
                self.facets = facets::extract(&result.items);
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                warn!(kind = %R::KIND, seq = outcome.seq, error = %e, "List fetch failed");
                self.error = Some(e);
            }
        }
        Applied::Current
    }

    /// Fetch the current query and apply it in one step.
    pub async fn refresh(&mut self) -> Applied {
        let outcome = self.refetch().run().await;
        self.apply(outcome)
    }

    pub fn query(&self) -> &ListQuery<R::Sort> {
        &self.query
    }

    /// Last successfully loaded page, if any.
    pub fn result(&self) -> Option<&ListResult<R>> {
        self.result.as_ref()
    }

    /// Items of the last successfully loaded page.
    pub fn items(&self) -> &[R] {
        self.result.as_ref().map(|r| r.items.as_slice()).unwrap_or(&[])
    }

    /// Facets derived from [`items`](Self::items).
    pub fn facets(&self) -> &FacetSet {
        &self.facets
    }

    /// Error from the latest fetch, if it failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.settled < self.issued
    }

    pub fn status(&self) -> ListStatus {
        if self.is_loading() {
            ListStatus::Loading
        } else if self.error.is_some() {
            ListStatus::Failed
        } else {
            match &self.result {
                None => ListStatus::NotLoaded,
                Some(r) if r.items.is_empty() => ListStatus::NoResults,
                Some(_) => ListStatus::Loaded,
            }
        }
    }

    /// Pagination/sort controls for the current state.
    pub fn widget(&self) -> PaginationWidget<R::Sort> {
        PaginationWidget::new(
            self.query.page(),
            self.result.as_ref().map_or(1, |r| r.total_pages),
            self.query.sort(),
            self.query.page_size(),
        )
    }
}

impl<R: Resource, B> std::fmt::Debug for ListController<R, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("kind", &R::KIND)
            .field("query", &self.query)
            .field("items", &self.result.as_ref().map(|r| r.items.len()))
            .field("error", &self.error)
            .field("issued", &self.issued)
            .field("settled", &self.settled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StatusError, TransportError};
    use crate::facets::Facet;
    use crate::query::QueryParams;
    use crate::resource::Note;
    use crate::sort::NoteSort;
    use crate::types::{ApiUrl, PageSize};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers from a script, recording every query string it saw.
    /// A response may carry a delay so completions can be reordered.
    struct ScriptedBackend {
        url: ApiUrl,
        responses: Mutex<VecDeque<(Duration, crate::Result<Value>)>>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<(Duration, crate::Result<Value>)>) -> Arc<Self> {
            Arc::new(Self {
                url: ApiUrl::new("https://api.test/api").unwrap(),
                responses: Mutex::new(responses.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Backend for ScriptedBackend {
        fn base_url(&self) -> &ApiUrl {
            &self.url
        }

        async fn request(&self, endpoint: &str, params: &QueryParams) -> crate::Result<Value> {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}?{}", endpoint, params.to_query_string()));
            let (delay, response) = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted request");
            tokio::time::sleep(delay).await;
            response
        }
    }

    fn page(subjects: &[&str], total_pages: u32) -> crate::Result<Value> {
        let notes: Vec<Value> = subjects
            .iter()
            .enumerate()
            .map(|(i, s)| json!({"_id": format!("{}-{}", s, i), "title": s, "subject": s}))
            .collect();
        Ok(json!({"notes": notes, "page": 1, "totalPages": total_pages}))
    }

    fn server_error() -> crate::Result<Value> {
        Err(StatusError::new(500, Some("Internal Server Error".to_string()), None).into())
    }

    #[tokio::test]
    async fn mount_loads_first_page_and_facets() {
        let backend = ScriptedBackend::new(vec![(Duration::ZERO, page(&["Math", "CS", "Math"], 3))]);
        let mut list = ListController::<Note, _>::new(backend.clone());
        assert_eq!(list.status(), ListStatus::NotLoaded);

        let ticket = list.mount();
        assert_eq!(list.status(), ListStatus::Loading);
        let outcome = ticket.run().await;
        assert_eq!(list.apply(outcome), Applied::Current);

        assert_eq!(list.status(), ListStatus::Loaded);
        assert_eq!(list.items().len(), 3);
        assert_eq!(list.facets().values(Facet::Subject), ["Math", "CS"]);
        assert_eq!(list.widget().total_pages(), 3);
        assert_eq!(backend.seen(), ["/notes?page=1&limit=10&sort=-createdAt"]);
    }

    #[tokio::test]
    async fn filter_change_resets_page_and_refetches() {
        let backend = ScriptedBackend::new(vec![
            (Duration::ZERO, page(&["Math"], 4)),
            (Duration::ZERO, page(&["Math"], 4)),
            (Duration::ZERO, page(&["Math"], 1)),
        ]);
        let mut list = ListController::<Note, _>::new(backend.clone());
        list.refresh().await;

        let ticket = list.set_query_field(QueryField::Page(3)).unwrap().unwrap();
        list.apply(ticket.run().await);
        assert_eq!(list.query().page(), 3);

        let ticket = list
            .set_query_field(QueryField::Filter(Facet::Subject, Some("Math".to_string())))
            .unwrap()
            .unwrap();
        assert_eq!(ticket.query().page(), 1);
        list.apply(ticket.run().await);

        assert_eq!(
            backend.seen().last().map(String::as_str),
            Some("/notes?page=1&limit=10&sort=-createdAt&subject=Math")
        );
    }

    #[tokio::test]
    async fn unchanged_field_issues_no_fetch() {
        let backend = ScriptedBackend::new(vec![(Duration::ZERO, page(&["Math"], 1))]);
        let mut list = ListController::<Note, _>::new(backend.clone());
        list.refresh().await;

        assert!(list.set_query_field(QueryField::Sort(NoteSort::NewestFirst)).unwrap().is_none());
        assert!(list.set_query_field(QueryField::PageSize(PageSize::Ten)).unwrap().is_none());
        assert!(!list.is_loading());
        assert_eq!(backend.seen().len(), 1);
    }

    #[tokio::test]
    async fn last_issued_query_wins_when_responses_arrive_out_of_order() {
        let backend = ScriptedBackend::new(vec![
            // First query answers slowly, second answers quickly.
            (Duration::from_millis(50), page(&["Old"], 1)),
            (Duration::from_millis(5), page(&["New"], 1)),
        ]);
        let mut list = ListController::<Note, _>::new(backend);

        let first = list
            .set_query_field(QueryField::Search(Some("old".to_string())))
            .unwrap()
            .unwrap();
        let second = list
            .set_query_field(QueryField::Search(Some("new".to_string())))
            .unwrap()
            .unwrap();

        let slow = tokio::spawn(first.run());
        let fast = tokio::spawn(second.run());

        let fast = fast.await.unwrap();
        assert_eq!(list.apply(fast), Applied::Current);
        assert_eq!(list.status(), ListStatus::Loaded);

        let slow = slow.await.unwrap();
        assert_eq!(list.apply(slow), Applied::Stale);

        assert_eq!(list.items()[0].title, "New");
        assert_eq!(list.query().search(), Some("new"));
    }

    #[tokio::test]
    async fn stale_completion_does_not_end_loading() {
        let backend = ScriptedBackend::new(vec![
            (Duration::ZERO, page(&["A"], 1)),
            (Duration::ZERO, page(&["B"], 1)),
        ]);
        let mut list = ListController::<Note, _>::new(backend);

        let first = list.refetch();
        let second = list.refetch();

        assert_eq!(list.apply(first.run().await), Applied::Stale);
        assert!(list.is_loading());
        assert_eq!(list.status(), ListStatus::Loading);

        assert_eq!(list.apply(second.run().await), Applied::Current);
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn empty_success_is_no_results_not_error() {
        let backend = ScriptedBackend::new(vec![(Duration::ZERO, page(&[], 1))]);
        let mut list = ListController::<Note, _>::new(backend);
        list.refresh().await;

        assert_eq!(list.status(), ListStatus::NoResults);
        assert!(list.error().is_none());
        assert!(list.facets().is_empty());
    }

    #[tokio::test]
    async fn failure_keeps_previous_items() {
        let backend = ScriptedBackend::new(vec![
            (Duration::ZERO, page(&["Math", "CS"], 2)),
            (Duration::ZERO, server_error()),
        ]);
        let mut list = ListController::<Note, _>::new(backend);
        list.refresh().await;

        let ticket = list.set_query_field(QueryField::Page(2)).unwrap().unwrap();
        list.apply(ticket.run().await);

        assert_eq!(list.status(), ListStatus::Failed);
        assert_eq!(list.error().and_then(Error::status), Some(500));
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.facets().values(Facet::Subject), ["Math", "CS"]);
    }

    #[tokio::test]
    async fn success_after_failure_clears_error() {
        let backend = ScriptedBackend::new(vec![
            (
                Duration::ZERO,
                Err(TransportError::Connection {
                    message: "refused".to_string(),
                }
                .into()),
            ),
            (Duration::ZERO, page(&["Math"], 1)),
        ]);
        let mut list = ListController::<Note, _>::new(backend);

        list.refresh().await;
        assert_eq!(list.status(), ListStatus::Failed);
        assert!(list.items().is_empty());

        list.refresh().await;
        assert_eq!(list.status(), ListStatus::Loaded);
        assert!(list.error().is_none());
    }

    #[tokio::test]
    async fn widget_events_drive_the_query() {
        let backend = ScriptedBackend::new(vec![
            (Duration::ZERO, page(&["Math"], 3)),
            (Duration::ZERO, page(&["Math"], 3)),
            (Duration::ZERO, page(&["Math"], 3)),
        ]);
        let mut list = ListController::<Note, _>::new(backend.clone());
        list.refresh().await;

        let widget = list.widget();
        assert!(widget.previous().is_none());
        let next = widget.next().unwrap();
        let ticket = list.handle(next).unwrap().unwrap();
        list.apply(ticket.run().await);
        assert_eq!(list.query().page(), 2);

        let event = list.widget().select_sort(NoteSort::TitleDesc).unwrap();
        let ticket = list.handle(event).unwrap().unwrap();
        list.apply(ticket.run().await);
        assert_eq!(list.query().page(), 1);
        assert_eq!(
            backend.seen().last().map(String::as_str),
            Some("/notes?page=1&limit=10&sort=-title")
        );
    }
}
