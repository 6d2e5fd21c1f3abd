//! Author attribution.

use serde::{Deserialize, Serialize};

use super::lenient;

/// The author of a resource.
///
/// The backend sends either a bare display name or a populated user object;
/// both decode into this one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAuthor")]
pub struct Author {
    /// Backend user id, when the author was populated from a user record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name. Falls back to the email address when no name is set.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAuthor {
    Name(String),
    Object {
        #[serde(flatten, deserialize_with = "lenient::opt_id")]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
}

impl From<RawAuthor> for Author {
    fn from(raw: RawAuthor) -> Self {
        match raw {
            RawAuthor::Name(name) => Author {
                id: None,
                name,
                email: None,
            },
            RawAuthor::Object { id, name, email } => Author {
                id,
                name: name
                    .filter(|n| !n.trim().is_empty())
                    .or_else(|| email.clone())
                    .unwrap_or_default(),
                email,
            },
        }
    }
}
