//! Course assignments.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, CourseInfo, Difficulty, Resource, first_present, lenient};
use crate::facets::Facet;
use crate::sort::AssignmentSort;
use crate::types::{ResourceId, ResourceKind};

const DEADLINE_SOON_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
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
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub course: CourseInfo,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub total_marks: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_lenient")]
    pub difficulty: Option<Difficulty>,
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

impl Assignment {
    /// True once the due date has passed. Assignments without a due date
    /// never become overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }

    /// True when the due date falls within the next seven days.
    pub fn is_deadline_soon(&self, now: DateTime<Utc>) -> bool {
        self.due_date
            .is_some_and(|due| due > now && due - now <= Duration::days(DEADLINE_SOON_DAYS))
    }

    pub fn badge_at(&self, now: DateTime<Utc>) -> Option<&'static str> {
        if self.is_overdue(now) {
            Some("overdue")
        } else if self.is_deadline_soon(now) {
            Some("due soon")
        } else {
            None
        }
    }
}

impl Resource for Assignment {
    const KIND: ResourceKind = ResourceKind::Assignments;
    const FACETS: &'static [Facet] = &[Facet::Semester, Facet::Subject];

    type Sort = AssignmentSort;

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
        format!("Check out this assignment: {}", self.title)
    }

    fn page_title(&self) -> String {
        format!("{} - MUCSIT Assignments", self.title)
    }

    fn badge(&self) -> Option<&'static str> {
        self.badge_at(Utc::now())
    }

    fn meta_description(&self) -> String {
        first_present(
            &[self.description.as_deref()],
            "View assignment details and solutions",
        )
    }
}
