//! Resource models.
//!
//! All four collections share the same contract: an opaque id, a required
//! title, and a bag of optional fields that downstream code must never treat
//! as present. Kind-specific behavior (facets, share text, page titles) hangs
//! off the [`Resource`] trait so the list controller and detail resolver can
//! be written once.

mod assignment;
mod author;
mod blog;
pub(crate) mod lenient;
mod note;
mod old_question;

use std::fmt::{self, Debug};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::facets::Facet;
use crate::sort::SortKey;
use crate::types::{ResourceId, ResourceKind};

pub use assignment::Assignment;
pub use author::Author;
pub use blog::{Blog, BlogSection};
pub use note::Note;
pub use old_question::OldQuestion;

/// A resource kind that can be listed and fetched by id.
pub trait Resource: DeserializeOwned + Serialize + Clone + Debug + Send + Sync + 'static {
    /// Which collection this type lives in.
    const KIND: ResourceKind;

    /// Facets derived from a page of this kind, in display order.
    const FACETS: &'static [Facet];

    /// Orderings offered for this kind.
    type Sort: SortKey;

    fn id(&self) -> &ResourceId;

    fn title(&self) -> &str;

    fn description(&self) -> Option<&str>;

    /// Values this item contributes to `facet`. Most facets are single-valued;
    /// tags are not.
    fn facet_values(&self, facet: Facet) -> Vec<String>;

    /// Attached file, if any. A preview is offered only when this is set.
    fn file_url(&self) -> Option<&str> {
        None
    }

    /// Text placed in the share sheet alongside the link.
    fn share_text(&self) -> String;

    /// `<title>` of the detail page.
    fn page_title(&self) -> String;

    /// Meta description of the detail page.
    fn meta_description(&self) -> String;

    /// Short time-sensitive badge shown next to the item in listings.
    fn badge(&self) -> Option<&'static str> {
        None
    }
}

/// Subject placement shared by notes, assignments, and old questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub semester: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub faculty: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub year: Option<i64>,
}

impl CourseInfo {
    pub(crate) fn facet_value(&self, facet: Facet) -> Option<String> {
        match facet {
            Facet::Subject => self.subject.clone(),
            Facet::Semester => self.semester.clone(),
            Facet::Year => self.year.map(|y| y.to_string()),
            _ => None,
        }
    }
}

/// Difficulty rating of an assignment or exam question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// A rating this client does not know about.
    Unknown,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Unknown => "unknown",
        }
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }
}

impl From<Difficulty> for &'static str {
    fn from(d: Difficulty) -> Self {
        d.as_str()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First non-blank candidate, or `fallback`.
pub(crate) fn first_present(candidates: &[Option<&str>], fallback: &str) -> String {
    candidates
        .iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .copied()
        .unwrap_or(fallback)
        .to_string()
}
