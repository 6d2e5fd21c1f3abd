//! Sitemap command implementation.

use anyhow::Result;
use clap::Args;

use mucsit_core::routes::{self, SitemapEntry};

use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SitemapArgs {
    /// Print entries as JSON instead of sitemap XML
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SitemapArgs, api: &ApiArgs) -> Result<()> {
    let entries = routes::sitemap(&api.site_url);
    if args.json {
        return output::json_pretty(&entries);
    }
    print!("{}", to_xml(&entries));
    Ok(())
}

fn to_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&entry.url)));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mucsit_core::SiteUrl;

    #[test]
    fn renders_every_route() {
        let site = SiteUrl::new("https://mucsit.edu").unwrap();
        let xml = to_xml(&routes::sitemap(&site));

        assert!(xml.starts_with("<?xml"));
        assert_eq!(xml.matches("<url>").count(), routes::NAVIGATION_LINKS.len());
        assert!(xml.contains("<loc>https://mucsit.edu/old-questions</loc>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.8</priority>"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
