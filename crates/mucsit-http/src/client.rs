//! HTTP client for the portal API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use mucsit_core::error::{Error, StatusError, TransportError};
use mucsit_core::query::QueryParams;
use mucsit_core::traits::Backend;
use mucsit_core::types::{ApiUrl, ResourceId};
use mucsit_core::{ListQuery, ListResult, Lookup, Resource, Result};

/// Requests that take longer than this are abandoned as timed out.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Error body shape used by the backend for non-success responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Builder for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    base: ApiUrl,
    timeout: Duration,
    user_agent: String,
}

impl ApiClientBuilder {
    /// Per-request timeout. Defaults to [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(ApiClient {
            client,
            base: self.base,
            timeout: self.timeout,
        })
    }
}

/// HTTP client for the portal REST API.
///
/// Issues GET requests against a fixed base URL and returns parsed bodies
/// unchanged. Every failure is returned as an [`Error`] value.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: ApiUrl,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client with default settings.
    pub fn new(base: ApiUrl) -> Result<Self> {
        Self::builder(base).build()
    }

    pub fn builder(base: ApiUrl) -> ApiClientBuilder {
        ApiClientBuilder {
            base,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("mucsit/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch one page of a collection.
    pub async fn list<R: Resource>(&self, query: &ListQuery<R::Sort>) -> Result<ListResult<R>> {
        mucsit_core::fetch_list::<R, Self>(self, query).await
    }

    /// Fetch one resource by id.
    pub async fn get<R: Resource>(&self, id: &ResourceId) -> Result<Lookup<R>> {
        mucsit_core::fetch_by_id::<R, Self>(self, id).await
    }

    /// Full request URL for an endpoint and its parameters.
    pub fn request_url(&self, endpoint: &str, params: &QueryParams) -> String {
        let url = self.base.endpoint_url(endpoint);
        let query = params.to_query_string();
        if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, query)
        }
    }

    /// GET an endpoint and parse its JSON body.
    #[instrument(skip(self, params), fields(base = %self.base))]
    pub async fn get_json(&self, endpoint: &str, params: &QueryParams) -> Result<Value> {
        let url = self.request_url(endpoint, params);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Turn a response into a parsed body or a status error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        trace!(status = %status, "Response");

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(parse_error_response(status, &body).into());
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            TransportError::Body {
                message: e.to_string(),
            }
            .into()
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() || err.is_body() {
            TransportError::Body {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        err.into()
    }
}

/// Build a status error, keeping the backend's message when it sent one.
fn parse_error_response(status: reqwest::StatusCode, body: &str) -> StatusError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error));

    StatusError::new(
        status.as_u16(),
        status.canonical_reason().map(str::to_string),
        message,
    )
}

#[async_trait]
impl Backend for ApiClient {
    fn base_url(&self) -> &ApiUrl {
        &self.base
    }

    async fn request(&self, endpoint: &str, params: &QueryParams) -> Result<Value> {
        self.get_json(endpoint, params).await
    }
}
