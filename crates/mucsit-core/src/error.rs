//! Error types for the portal client.
//!
//! Every failure that can cross the API client boundary is represented here
//! as a value. A missing resource is *not* an error; see
//! [`Lookup`](crate::detail::Lookup).

use std::fmt;
use thiserror::Error;

/// The unified error type for portal client operations.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with a non-success HTTP status.
    #[error("backend error: {0}")]
    Status(#[from] StatusError),

    /// The backend answered successfully but the payload had an unexpected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] MalformedResponse),

    /// Input validation errors (ids, URLs, query fields).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true for every failure the view should surface as a retryable
    /// error banner: transport failures, bad statuses, and malformed payloads.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Status(_) | Error::Malformed(_)
        )
    }

    /// Returns the HTTP status when the backend rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(e) => Some(e.status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The response body could not be read or parsed as JSON.
    #[error("invalid response body: {message}")]
    Body { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success HTTP response from the backend.
#[derive(Debug, Clone)]
pub struct StatusError {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status, if known.
    pub status_text: Option<String>,
    /// Error message from the response body, if the backend sent one.
    pub message: Option<String>,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref text) = self.status_text {
            write!(f, " {}", text)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

impl StatusError {
    /// Create a new status error.
    pub fn new(status: u16, status_text: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            status_text,
            message,
        }
    }

    /// Returns true if the backend reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// A payload whose shape did not match what the endpoint documents.
#[derive(Debug, Clone, Error)]
#[error("{endpoint}: {reason}")]
pub struct MalformedResponse {
    /// Endpoint the payload came from.
    pub endpoint: String,
    /// What was wrong with it.
    pub reason: String,
}

impl MalformedResponse {
    pub fn new(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Clone, Error)]
pub enum InvalidInputError {
    /// Invalid resource id.
    #[error("invalid resource id '{value}': {reason}")]
    ResourceId { value: String, reason: String },

    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Page number outside the valid range.
    #[error("invalid page {page}: pages start at 1")]
    Page { page: u32 },

    /// Page size not in the allowed set.
    #[error("invalid page size {size}: expected one of 5, 10, 20, 50")]
    PageSize { size: u32 },

    /// Sort key not offered for this resource kind.
    #[error("unknown sort key '{value}' for {kind}")]
    SortKey { value: String, kind: String },

    /// Unknown resource kind name.
    #[error("unknown resource kind '{value}'")]
    ResourceKind { value: String },

    /// Unknown facet name.
    #[error("unknown facet '{value}'")]
    Facet { value: String },
}
