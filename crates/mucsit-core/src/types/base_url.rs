//! Validated base URLs for the backend API and the public site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Parse and normalize a base URL.
///
/// Base URLs must be absolute, use HTTPS (HTTP only for localhost), carry a
/// host, and have no query or fragment. A trailing slash is removed so paths
/// can be appended with a leading `/`.
fn parse_base(s: &str) -> Result<String, Error> {
    let invalid = |reason: &str| InvalidInputError::BaseUrl {
        value: s.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(s).map_err(|e| invalid(&e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(invalid("must be an absolute URL").into());
    }

    let is_localhost = url
        .host_str()
        .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]" || h == "::1");

    let scheme = url.scheme();
    if scheme != "https" && !(scheme == "http" && is_localhost) {
        return Err(invalid("must use HTTPS (HTTP allowed only for localhost)").into());
    }

    if url.host_str().is_none() {
        return Err(invalid("must have a host").into());
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment").into());
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Join a normalized base with a path, inserting exactly one `/`.
fn join(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Base URL of the backend REST API (e.g. `https://host/api`).
///
/// # Example
///
/// ```
/// use mucsit_core::ApiUrl;
///
/// let api = ApiUrl::new("https://mucsitbackend.onrender.com/api/").unwrap();
/// assert_eq!(api.endpoint_url("/notes"), "https://mucsitbackend.onrender.com/api/notes");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(String);

impl ApiUrl {
    /// Create a new API URL, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, not HTTPS (outside
    /// localhost), or carries a query string.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        parse_base(s.as_ref()).map(Self)
    }

    /// Returns the full URL of an endpoint path such as `/notes/abc`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        join(&self.0, endpoint)
    }

    /// Returns the base URL as a string, without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Public base URL of the portal, used for canonical and share links.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SiteUrl(String);

impl SiteUrl {
    /// Create a new site URL, validating the format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        parse_base(s.as_ref()).map(Self)
    }

    /// Returns the absolute URL of a site route such as `/notes/abc`.
    pub fn page_url(&self, route: &str) -> String {
        join(&self.0, route)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! base_url_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $ty::new(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

base_url_impls!(ApiUrl);
base_url_impls!(SiteUrl);
