//! Sort keys.
//!
//! Each resource kind offers its own fixed set of orderings. On the wire a
//! sort key is a field name, prefixed with `-` for descending order.

use std::fmt::Debug;

use serde::Serialize;

/// A sort ordering offered for one resource kind.
pub trait SortKey: Copy + Eq + Default + Debug + Send + Sync + 'static {
    /// Every ordering offered, in menu order.
    const ALL: &'static [Self];

    /// Wire value sent as the `sort` query parameter (e.g. `-createdAt`).
    fn as_param(self) -> &'static str;

    /// Menu label (e.g. "Newest First").
    fn label(self) -> &'static str;

    /// Look up an ordering by its wire value.
    fn from_param(param: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_param() == param)
    }

    /// All orderings as menu options.
    fn options() -> Vec<SortOption> {
        Self::ALL
            .iter()
            .map(|k| SortOption {
                value: k.as_param(),
                label: k.label(),
            })
            .collect()
    }
}

/// A sort menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
}

macro_rules! sort_keys {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            #[default]
            $default:ident => ($default_param:literal, $default_label:literal),
            $($variant:ident => ($param:literal, $label:literal)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            #[default]
            $default,
            $($variant),*
        }

        impl SortKey for $name {
            const ALL: &'static [Self] = &[$name::$default, $($name::$variant),*];

            fn as_param(self) -> &'static str {
                match self {
                    $name::$default => $default_param,
                    $($name::$variant => $param),*
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $name::$default => $default_label,
                    $($name::$variant => $label),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_param())
            }
        }
    };
}

sort_keys! {
    /// Orderings for the notes list.
    pub enum NoteSort {
        #[default]
        NewestFirst => ("-createdAt", "Newest First"),
        OldestFirst => ("createdAt", "Oldest First"),
        TitleAsc => ("title", "Title (A-Z)"),
        TitleDesc => ("-title", "Title (Z-A)"),
    }
}

sort_keys! {
    /// Orderings for the assignments list.
    pub enum AssignmentSort {
        #[default]
        DueSoon => ("-dueDate", "Due Soon"),
        DueLater => ("dueDate", "Due Later"),
        NewestFirst => ("-createdAt", "Newest First"),
        OldestFirst => ("createdAt", "Oldest First"),
        TitleAsc => ("title", "Title (A-Z)"),
    }
}

sort_keys! {
    /// Orderings for the old questions list.
    pub enum OldQuestionSort {
        #[default]
        NewestYear => ("-year", "Newest Year"),
        OldestYear => ("year", "Oldest Year"),
        RecentlyAdded => ("-createdAt", "Recently Added"),
        TitleAsc => ("title", "Title (A-Z)"),
    }
}

sort_keys! {
    /// Orderings for the blog list.
    pub enum BlogSort {
        #[default]
        NewestFirst => ("-createdAt", "Newest First"),
        OldestFirst => ("createdAt", "Oldest First"),
        TitleAsc => ("title", "Title (A-Z)"),
        MostViewed => ("-views", "Most Viewed"),
    }
}
