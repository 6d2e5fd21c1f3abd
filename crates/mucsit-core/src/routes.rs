//! Site routes and sitemap.

use serde::Serialize;

use crate::types::{ResourceId, ResourceKind, SiteUrl};

pub const SITE_DESCRIPTION: &str =
    "Your Academic Resource Hub - Access notes, assignments, old questions, and blogs";

/// A top-level navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

pub const NAVIGATION_LINKS: &[NavLink] = &[
    NavLink { href: "/", label: "Home" },
    NavLink { href: "/notes", label: "Notes" },
    NavLink { href: "/assignments", label: "Assignments" },
    NavLink { href: "/old-questions", label: "Old Questions" },
    NavLink { href: "/blogs", label: "Blogs" },
    NavLink { href: "/about", label: "About" },
    NavLink { href: "/contact", label: "Contact" },
];

/// Route of a resource's detail page.
pub fn detail_path(kind: ResourceKind, id: &ResourceId) -> String {
    format!("/{}/{}", kind.slug(), id)
}

/// Every static page is re-crawled weekly.
pub const CHANGE_FREQUENCY: &str = "weekly";

/// One `<url>` entry of the sitemap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// Sitemap of the static navigation routes. The home page ranks highest.
pub fn sitemap(site: &SiteUrl) -> Vec<SitemapEntry> {
    NAVIGATION_LINKS
        .iter()
        .map(|link| SitemapEntry {
            url: site.page_url(link.href),
            change_frequency: CHANGE_FREQUENCY,
            priority: if link.href == "/" { 1.0 } else { 0.8 },
        })
        .collect()
}
