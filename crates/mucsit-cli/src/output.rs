//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use mucsit_core::{FacetSet, PaginationWidget, Resource, SortKey};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dimmed note on stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a labeled field if it has a value.
pub fn opt_field(label: &str, value: Option<impl ToString>) {
    if let Some(value) = value {
        field(label, &value.to_string());
    }
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one line per item: id, title, then any badge.
pub fn items<R: Resource>(items: &[R]) {
    for item in items {
        match item.badge() {
            Some(badge) => println!(
                "{}  {}  {}",
                item.id().as_str().dimmed(),
                item.title().bold(),
                format!("[{}]", badge).yellow()
            ),
            None => println!("{}  {}", item.id().as_str().dimmed(), item.title().bold()),
        }
    }
}

/// Print the pagination footer.
pub fn footer<S: SortKey>(widget: &PaginationWidget<S>) {
    println!(
        "{}  {} {}  {} {}",
        widget.label().cyan(),
        "sort:".dimmed(),
        widget.sort().label(),
        "per page:".dimmed(),
        widget.page_size()
    );
}

/// Print each facet with its values.
pub fn facets(facets: &FacetSet) {
    for (facet, values) in facets.iter() {
        if !values.is_empty() {
            field(facet.name(), &values.join(", "));
        }
    }
}
