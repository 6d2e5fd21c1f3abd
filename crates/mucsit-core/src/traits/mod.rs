//! Core traits.

mod backend;

pub use backend::Backend;
