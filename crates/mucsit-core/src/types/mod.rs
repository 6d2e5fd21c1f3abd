//! Core value types.
//!
//! These types enforce their invariants at construction time, so a value
//! that exists is always safe to put in a URL or a query string.

mod base_url;
mod page_size;
mod resource_id;
mod resource_kind;

pub use base_url::{ApiUrl, SiteUrl};
pub use page_size::PageSize;
pub use resource_id::ResourceId;
pub use resource_kind::ResourceKind;
