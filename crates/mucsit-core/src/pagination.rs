//! Pagination and sort controls.
//!
//! The widget is a pure function of the list state. It never changes
//! anything itself; every interaction yields an event (or nothing, when the
//! interaction is out of range) that the owner applies to its query.

use serde::Serialize;

use crate::query::QueryField;
use crate::sort::{SortKey, SortOption};
use crate::types::PageSize;

/// A change requested through the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationEvent<S> {
    PageChanged(u32),
    SortChanged(S),
    PageSizeChanged(PageSize),
}

impl<S> From<PaginationEvent<S>> for QueryField<S> {
    fn from(event: PaginationEvent<S>) -> Self {
        match event {
            PaginationEvent::PageChanged(page) => QueryField::Page(page),
            PaginationEvent::SortChanged(sort) => QueryField::Sort(sort),
            PaginationEvent::PageSizeChanged(size) => QueryField::PageSize(size),
        }
    }
}

/// Page navigation plus sort and page-size selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationWidget<S> {
    current_page: u32,
    total_pages: u32,
    #[serde(skip)]
    sort: S,
    page_size: PageSize,
}

impl<S: SortKey> PaginationWidget<S> {
    pub fn new(current_page: u32, total_pages: u32, sort: S, page_size: PageSize) -> Self {
        Self {
            current_page: current_page.max(1),
            total_pages: total_pages.max(1),
            sort,
            page_size,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn sort(&self) -> S {
        self.sort
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn sort_options(&self) -> Vec<SortOption> {
        S::options()
    }

    pub fn page_size_options(&self) -> &'static [PageSize] {
        &PageSize::ALL
    }

    /// "Page X of Y".
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn previous(&self) -> Option<PaginationEvent<S>> {
        self.go_to(self.current_page.saturating_sub(1))
    }

    pub fn next(&self) -> Option<PaginationEvent<S>> {
        self.go_to(self.current_page.saturating_add(1))
    }

    /// Jump to `page`. Pages outside `1..=total_pages`, and the page already
    /// shown, produce no event.
    pub fn go_to(&self, page: u32) -> Option<PaginationEvent<S>> {
        if page < 1 || page > self.total_pages || page == self.current_page {
            None
        } else {
            Some(PaginationEvent::PageChanged(page))
        }
    }

    pub fn select_sort(&self, sort: S) -> Option<PaginationEvent<S>> {
        (sort != self.sort).then_some(PaginationEvent::SortChanged(sort))
    }

    /// Select a sort by its wire value; values not on the menu are ignored.
    pub fn select_sort_param(&self, param: &str) -> Option<PaginationEvent<S>> {
        S::from_param(param).and_then(|sort| self.select_sort(sort))
    }

    /// Select a page size; sizes not on the menu are ignored.
    pub fn select_page_size(&self, size: u32) -> Option<PaginationEvent<S>> {
        let size = PageSize::try_from(size).ok()?;
        (size != self.page_size).then_some(PaginationEvent::PageSizeChanged(size))
    }
}
