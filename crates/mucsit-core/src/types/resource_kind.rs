//! Resource kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The four collections served by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Notes,
    Assignments,
    OldQuestions,
    Blogs,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Notes,
        ResourceKind::Assignments,
        ResourceKind::OldQuestions,
        ResourceKind::Blogs,
    ];

    /// Path segment shared by the backend collection endpoint and the site route.
    pub fn slug(self) -> &'static str {
        match self {
            ResourceKind::Notes => "notes",
            ResourceKind::Assignments => "assignments",
            ResourceKind::OldQuestions => "old-questions",
            ResourceKind::Blogs => "blogs",
        }
    }

    /// Backend collection endpoint, relative to the API base.
    pub fn collection_endpoint(self) -> String {
        format!("/{}", self.slug())
    }

    /// Backend single-resource endpoint, relative to the API base.
    pub fn item_endpoint(self, id: &str) -> String {
        format!("/{}/{}", self.slug(), id)
    }

    /// Key of the item array inside a collection envelope.
    pub fn envelope_key(self) -> &'static str {
        match self {
            ResourceKind::Notes => "notes",
            ResourceKind::Assignments => "assignments",
            ResourceKind::OldQuestions => "oldQuestions",
            ResourceKind::Blogs => "blogs",
        }
    }

    /// Human label used in headings and navigation.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Notes => "Notes",
            ResourceKind::Assignments => "Assignments",
            ResourceKind::OldQuestions => "Old Questions",
            ResourceKind::Blogs => "Blogs",
        }
    }

    /// Singular noun used in messages ("Note Not Found").
    pub fn noun(self) -> &'static str {
        match self {
            ResourceKind::Notes => "Note",
            ResourceKind::Assignments => "Assignment",
            ResourceKind::OldQuestions => "Question",
            ResourceKind::Blogs => "Article",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notes" | "note" => Ok(ResourceKind::Notes),
            "assignments" | "assignment" => Ok(ResourceKind::Assignments),
            "old-questions" | "old-question" | "oldquestions" | "questions" => {
                Ok(ResourceKind::OldQuestions)
            }
            "blogs" | "blog" => Ok(ResourceKind::Blogs),
            _ => Err(InvalidInputError::ResourceKind {
                value: s.to_string(),
            }
            .into()),
        }
    }
}
