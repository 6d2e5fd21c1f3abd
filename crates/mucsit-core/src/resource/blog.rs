//! Blog articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, Resource, first_present, lenient};
use crate::facets::Facet;
use crate::sort::BlogSort;
use crate::types::{ResourceId, ResourceKind};

/// One block of article body text, optionally illustrated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSection {
    #[serde(
        flatten,
        deserialize_with = "lenient::opt_id",
        serialize_with = "lenient::serialize_opt_id"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(
        flatten,
        deserialize_with = "lenient::resource_id",
        serialize_with = "lenient::serialize_id"
    )]
    pub id: ResourceId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub sections: Vec<BlogSection>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub seo_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub seo_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_lenient")]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub views: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub likes: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub read_time_minutes: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Blog {
    /// Keywords doubling as tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.seo_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
    }
}

impl Resource for Blog {
    const KIND: ResourceKind = ResourceKind::Blogs;
    const FACETS: &'static [Facet] = &[Facet::Tag, Facet::Category];

    type Sort = BlogSort;

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
            Facet::Tag => self.tags().map(str::to_string).collect(),
            Facet::Category => self.category.clone().into_iter().collect(),
            _ => Vec::new(),
        }
    }

    fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    fn share_text(&self) -> String {
        first_present(
            &[self.excerpt.as_deref(), self.description.as_deref()],
            &self.title,
        )
    }

    fn page_title(&self) -> String {
        format!("{} - MUCSIT Blog", self.title)
    }

    fn meta_description(&self) -> String {
        first_present(
            &[self.excerpt.as_deref(), self.description.as_deref()],
            "Read expert insights on MUCSIT blog.",
        )
    }
}
