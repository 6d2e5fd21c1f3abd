//! Study notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, CourseInfo, Resource, first_present, lenient};
use crate::facets::Facet;
use crate::sort::NoteSort;
use crate::types::{ResourceId, ResourceKind};

/// A study note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(
        flatten,
        deserialize_with = "lenient::resource_id",
        serialize_with = "lenient::serialize_id"
    )]
    pub id: ResourceId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub course: CourseInfo,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub seo_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub seo_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_lenient")]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Note {
    const KIND: ResourceKind = ResourceKind::Notes;
    const FACETS: &'static [Facet] = &[Facet::Subject, Facet::Semester];

    type Sort = NoteSort;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn facet_values(&self, facet: Facet) -> Vec<String> {
        self.course.facet_value(facet).into_iter().collect()
    }

    fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    fn share_text(&self) -> String {
        format!(
            "Check out this note: {} - {}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        )
    }

    fn page_title(&self) -> String {
        format!("{} - MUCSIT Notes", self.title)
    }

    fn meta_description(&self) -> String {
        first_present(
            &[self.description.as_deref(), self.seo_description.as_deref()],
            "Read comprehensive study notes on MUCSIT",
        )
    }
}
