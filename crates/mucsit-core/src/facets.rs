//! Facet extraction.
//!
//! Facets are the quick-filter values offered above a list. They are derived
//! from the items of the page currently on screen and nothing else: values
//! that only appear on other pages are not offered until those pages load.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::resource::Resource;

/// A field that can be offered as a quick filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Subject,
    Semester,
    Year,
    Difficulty,
    Category,
    Tag,
}

impl Facet {
    pub fn name(self) -> &'static str {
        match self {
            Facet::Subject => "subject",
            Facet::Semester => "semester",
            Facet::Year => "year",
            Facet::Difficulty => "difficulty",
            Facet::Category => "category",
            Facet::Tag => "tag",
        }
    }

    /// Backend query parameter that filters on this facet.
    ///
    /// Tags are keywords on blog posts; the blog endpoint filters them
    /// through its `category` parameter.
    pub fn param(self) -> &'static str {
        match self {
            Facet::Tag => "category",
            other => other.name(),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subject" => Ok(Facet::Subject),
            "semester" => Ok(Facet::Semester),
            "year" => Ok(Facet::Year),
            "difficulty" => Ok(Facet::Difficulty),
            "category" => Ok(Facet::Category),
            "tag" | "tags" => Ok(Facet::Tag),
            _ => Err(InvalidInputError::Facet {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// Distinct values of each configured facet, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetSet {
    entries: Vec<(Facet, Vec<String>)>,
}

impl FacetSet {
    /// Values for one facet; empty if the facet is not configured or nothing
    /// on the page carries it.
    pub fn values(&self, facet: Facet) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| *f == facet)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Facet, &[String])> {
        self.entries.iter().map(|(f, v)| (*f, v.as_slice()))
    }

    /// True when no facet has any value.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_empty())
    }
}

/// Collect distinct non-empty values of `facet` from `items`, keeping the
/// order in which each value first appears.
pub fn distinct_values<R: Resource>(items: &[R], facet: Facet) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for item in items {
        for value in item.facet_values(facet) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if seen.insert(value.to_string()) {
                values.push(value.to_string());
            }
        }
    }
    values
}

/// Build the facet set for a page of items using the kind's configured facets.
pub fn extract<R: Resource>(items: &[R]) -> FacetSet {
    FacetSet {
        entries: R::FACETS
            .iter()
            .map(|&facet| (facet, distinct_values(items, facet)))
            .collect(),
    }
}
