//! Past exam papers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, CourseInfo, Difficulty, Resource, first_present, lenient};
use crate::facets::Facet;
use crate::sort::OldQuestionSort;
use crate::types::{ResourceId, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OldQuestion {
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
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub answer: Option<String>,
    #[serde(flatten)]
    pub course: CourseInfo,
    #[serde(default, deserialize_with = "lenient::opt_lenient")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub views: Option<i64>,
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

impl Resource for OldQuestion {
    const KIND: ResourceKind = ResourceKind::OldQuestions;
    const FACETS: &'static [Facet] = &[Facet::Year, Facet::Subject, Facet::Semester];

    type Sort = OldQuestionSort;

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
        match facet {
            Facet::Difficulty => self
                .difficulty
                .map(|d| d.as_str().to_string())
                .into_iter()
                .collect(),
            other => self.course.facet_value(other).into_iter().collect(),
        }
    }

    fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    fn share_text(&self) -> String {
        format!("Check out this past paper: {}", self.title)
    }

    fn page_title(&self) -> String {
        format!("{} - Past Papers - MUCSIT", self.title)
    }

    fn meta_description(&self) -> String {
        first_present(
            &[self.description.as_deref()],
            "Access past exam papers and old questions",
        )
    }
}
