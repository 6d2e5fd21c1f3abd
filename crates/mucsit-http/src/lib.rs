//! mucsit-http - reqwest-backed [`Backend`](mucsit_core::Backend) for the
//! MUCSIT portal API.

mod client;

pub use client::{ApiClient, ApiClientBuilder, DEFAULT_TIMEOUT};
