//! Backend trait.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::query::QueryParams;
use crate::types::ApiUrl;

/// Something that answers portal API requests.
///
/// Implementations issue the request and return the parsed JSON body
/// unchanged. Every failure (network, timeout, non-success status,
/// unparseable body) comes back as an `Err`; implementations never panic
/// across this boundary.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Base URL requests are resolved against.
    fn base_url(&self) -> &ApiUrl;

    /// Issue a GET for `endpoint` (e.g. `/notes`) with the given parameters.
    async fn request(&self, endpoint: &str, params: &QueryParams) -> Result<Value>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn base_url(&self) -> &ApiUrl {
        (**self).base_url()
    }

    async fn request(&self, endpoint: &str, params: &QueryParams) -> Result<Value> {
        (**self).request(endpoint, params).await
    }
}
