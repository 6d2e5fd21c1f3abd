//! Detail pages.
//!
//! Resolving a resource by id has three outcomes that the view must render
//! differently: the resource, a standard "not found" page, or a retryable
//! error. [`Lookup`] covers the first two; errors stay in the `Result`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::envelope::{decode_detail, unwrap_detail};
use crate::error::Error;
use crate::query::QueryParams;
use crate::resource::Resource;
use crate::routes;
use crate::traits::Backend;
use crate::types::{ResourceId, ResourceKind, SiteUrl};

/// Result of looking a resource up by id.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<R> {
    Found(R),
    NotFound,
}

impl<R> Lookup<R> {
    pub fn found(self) -> Option<R> {
        match self {
            Lookup::Found(r) => Some(r),
            Lookup::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }
}

/// Fetch one `R` by id.
///
/// An absent payload and an HTTP 404 both resolve to [`Lookup::NotFound`].
/// Transport failures, other statuses, and undecodable payloads are errors.
#[instrument(skip(backend), fields(kind = %R::KIND, %id))]
pub async fn fetch_by_id<R, B>(backend: &B, id: &ResourceId) -> Result<Lookup<R>, Error>
where
    R: Resource,
    B: Backend + ?Sized,
{
    let endpoint = R::KIND.item_endpoint(id.as_str());

    let body = match backend.request(&endpoint, &QueryParams::new()).await {
        Ok(body) => body,
        Err(Error::Status(status)) if status.is_not_found() => {
            debug!("Backend reported 404");
            return Ok(Lookup::NotFound);
        }
        Err(e) => return Err(e),
    };

    match unwrap_detail(&endpoint, body)? {
        Some(value) => {
            let resource = decode_detail::<R>(&endpoint, value)?;
            debug!("Resource resolved");
            Ok(Lookup::Found(resource))
        }
        None => {
            debug!("Empty payload");
            Ok(Lookup::NotFound)
        }
    }
}

/// Resolves detail pages against a backend and renders their affordances.
#[derive(Debug)]
pub struct DetailResolver<B> {
    backend: Arc<B>,
    site: SiteUrl,
}

impl<B: Backend> DetailResolver<B> {
    pub fn new(backend: Arc<B>, site: SiteUrl) -> Self {
        Self { backend, site }
    }

    pub fn site(&self) -> &SiteUrl {
        &self.site
    }

    pub async fn fetch_by_id<R: Resource>(&self, id: &ResourceId) -> Result<Lookup<R>, Error> {
        fetch_by_id::<R, B>(&self.backend, id).await
    }

    /// Fetch a resource and build everything its detail page needs.
    pub async fn resolve<R: Resource>(&self, id: &ResourceId) -> Result<DetailPage<R>, Error> {
        Ok(match self.fetch_by_id::<R>(id).await? {
            Lookup::Found(resource) => DetailPage::found(&self.site, resource),
            Lookup::NotFound => DetailPage::not_found(R::KIND),
        })
    }
}

/// What the share sheet is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_resource<R: Resource>(site: &SiteUrl, resource: &R) -> Self {
        Self {
            title: resource.title().to_string(),
            text: resource.share_text(),
            url: site.page_url(&routes::detail_path(R::KIND, resource.id())),
        }
    }
}

/// `<head>` metadata for a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}

impl PageMeta {
    pub fn for_resource<R: Resource>(site: &SiteUrl, resource: &R) -> Self {
        Self {
            title: resource.page_title(),
            description: Some(resource.meta_description()),
            canonical_url: Some(site.page_url(&routes::detail_path(R::KIND, resource.id()))),
        }
    }

    /// Metadata of the standard "not found" page for `kind`.
    pub fn not_found(kind: ResourceKind) -> Self {
        Self {
            title: format!("{} Not Found - MUCSIT", kind.noun()),
            description: None,
            canonical_url: None,
        }
    }
}

/// A resolved detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum DetailPage<R> {
    Found {
        meta: PageMeta,
        share: SharePayload,
        /// File to embed in the preview pane; `None` disables preview.
        preview_url: Option<String>,
        resource: R,
    },
    NotFound {
        meta: PageMeta,
    },
}

impl<R: Resource> DetailPage<R> {
    pub fn found(site: &SiteUrl, resource: R) -> Self {
        DetailPage::Found {
            meta: PageMeta::for_resource(site, &resource),
            share: SharePayload::for_resource(site, &resource),
            preview_url: resource
                .file_url()
                .filter(|u| !u.trim().is_empty())
                .map(str::to_string),
            resource,
        }
    }

    pub fn not_found(kind: ResourceKind) -> Self {
        DetailPage::NotFound {
            meta: PageMeta::not_found(kind),
        }
    }

    pub fn meta(&self) -> &PageMeta {
        match self {
            DetailPage::Found { meta, .. } | DetailPage::NotFound { meta } => meta,
        }
    }

    pub fn can_preview(&self) -> bool {
        matches!(self, DetailPage::Found { preview_url: Some(_), .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StatusError, TransportError};
    use crate::resource::{Blog, Note};
    use crate::types::ApiUrl;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct FixedBackend {
        url: ApiUrl,
        reply: fn(&str) -> crate::Result<Value>,
    }

    impl FixedBackend {
        fn new(reply: fn(&str) -> crate::Result<Value>) -> Arc<Self> {
            Arc::new(Self {
                url: ApiUrl::new("https://api.test/api").unwrap(),
                reply,
            })
        }
    }

    #[async_trait]
    impl Backend for FixedBackend {
        fn base_url(&self) -> &ApiUrl {
            &self.url
        }

        async fn request(&self, endpoint: &str, _params: &QueryParams) -> crate::Result<Value> {
            (self.reply)(endpoint)
        }
    }

    fn site() -> SiteUrl {
        SiteUrl::new("https://mucsit.edu").unwrap()
    }

    fn id(s: &str) -> ResourceId {
        ResourceId::new(s).unwrap()
    }

    #[tokio::test]
    async fn found_resource() {
        let backend = FixedBackend::new(|endpoint| {
            assert_eq!(endpoint, "/notes/n1");
            Ok(json!({"_id": "n1", "title": "Automata", "fileUrl": "https://files/a.pdf"}))
        });
        let resolver = DetailResolver::new(backend, site());

        let page = resolver.resolve::<Note>(&id("n1")).await.unwrap();
        assert!(page.can_preview());
        match page {
            DetailPage::Found { meta, share, resource, .. } => {
                assert_eq!(resource.title, "Automata");
                assert_eq!(meta.title, "Automata - MUCSIT Notes");
                assert_eq!(share.url, "https://mucsit.edu/notes/n1");
                assert_eq!(meta.canonical_url.as_deref(), Some("https://mucsit.edu/notes/n1"));
            }
            DetailPage::NotFound { .. } => panic!("expected a resource"),
        }
    }

    #[tokio::test]
    async fn nested_data_wrapper_is_unwrapped() {
        let backend =
            FixedBackend::new(|_| Ok(json!({"data": {"_id": "b1", "title": "Hello", "excerpt": "Hi"}})));
        let lookup = fetch_by_id::<Blog, _>(&*backend, &id("b1")).await.unwrap();
        assert_eq!(lookup.found().map(|b| b.share_text()), Some("Hi".to_string()));
    }

    #[tokio::test]
    async fn null_payload_is_not_found() {
        let backend = FixedBackend::new(|_| Ok(Value::Null));
        let resolver = DetailResolver::new(backend, site());

        let page = resolver.resolve::<Note>(&id("missing")).await.unwrap();
        assert_eq!(page.meta().title, "Note Not Found - MUCSIT");
        assert!(!page.can_preview());
    }

    #[tokio::test]
    async fn http_404_is_not_found() {
        let backend = FixedBackend::new(|_| {
            Err(StatusError::new(404, Some("Not Found".to_string()), None).into())
        });
        let lookup = fetch_by_id::<Note, _>(&*backend, &id("gone")).await.unwrap();
        assert!(lookup.is_not_found());
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_error_not_not_found() {
        let backend = FixedBackend::new(|_| {
            Err(TransportError::Connection {
                message: "connection refused".to_string(),
            }
            .into())
        });
        let err = fetch_by_id::<Note, _>(&*backend, &id("n1")).await.unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn server_error_is_an_error() {
        let backend = FixedBackend::new(|_| Err(StatusError::new(500, None, None).into()));
        let err = fetch_by_id::<Note, _>(&*backend, &id("n1")).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn undecodable_payload_is_malformed() {
        let backend = FixedBackend::new(|_| Ok(json!({"_id": "n1"})));
        let err = fetch_by_id::<Note, _>(&*backend, &id("n1")).await.unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn not_found_titles_per_kind() {
        assert_eq!(
            PageMeta::not_found(ResourceKind::Blogs).title,
            "Article Not Found - MUCSIT"
        );
        assert_eq!(
            PageMeta::not_found(ResourceKind::OldQuestions).title,
            "Question Not Found - MUCSIT"
        );
    }
}
