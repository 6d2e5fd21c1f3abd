//! Opaque resource identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// An opaque identifier assigned by the backend.
///
/// Ids are unique within their resource kind and are embedded directly in
/// endpoint paths (`/notes/{id}`), so they must be non-empty and contain no
/// path, query, or fragment delimiters.
///
/// # Example
///
/// ```
/// use mucsit_core::ResourceId;
///
/// let id = ResourceId::new("6650f1c2a9e4b1d2c3e4f5a6").unwrap();
/// assert_eq!(id.as_str(), "6650f1c2a9e4b1d2c3e4f5a6");
/// assert!(ResourceId::new("../admin").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new id, validating that it is safe to place in a path.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: &str| InvalidInputError::ResourceId {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("must not be empty").into());
        }

        if s.len() > 128 {
            return Err(invalid("must be at most 128 characters").into());
        }

        if let Some(c) = s
            .chars()
            .find(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
        {
            return Err(invalid(&format!("contains forbidden character {:?}", c)).into());
        }

        if s == "." || s == ".." {
            return Err(invalid("must not be a relative path segment").into());
        }

        Ok(())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
