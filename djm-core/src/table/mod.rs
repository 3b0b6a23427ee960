//! Client-side list views
//!
//! A [`ListView`] holds the rows of the last fetch and derives what is on
//! screen from them: status filter first, then a stable sort, then the page
//! slice. The derived order is rebuilt on every change, so toggling the
//! direction or re-sorting never compounds earlier transforms.

mod job;
mod task;

pub use job::JobSortKey;
pub use task::TaskSortKey;

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use thiserror::Error;

/// Rows per page unless configured otherwise
pub const TABLE_PAGE_SIZE: usize = 10;

/// A record type that can be listed in a [`ListView`]
pub trait TableRow {
    /// Columns the view can be sorted by
    type SortKey: Copy + Eq + Debug;
    /// Value the status filter matches on
    type Status: Copy + Eq + Debug + Display;

    fn status(&self) -> Self::Status;

    /// Ascending comparison on `key`
    fn compare(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("No rows with status '{0}' to filter on")]
    StatusUnavailable(String),
}

/// Sorted, filtered, paginated view over fetched rows
#[derive(Debug, Clone)]
pub struct ListView<T: TableRow> {
    rows: Vec<T>,
    /// Indices into `rows`, in display order
    visible: Vec<usize>,
    sort_by: Option<T::SortKey>,
    direction: SortDirection,
    status_filter: Option<T::Status>,
    /// 1-based
    page: usize,
    page_size: usize,
}

impl<T: TableRow> ListView<T> {
    pub fn new(rows: Vec<T>, page_size: usize) -> Self {
        let mut view = Self {
            rows,
            visible: Vec::new(),
            sort_by: None,
            direction: SortDirection::Ascending,
            status_filter: None,
            page: 1,
            page_size: page_size.max(1),
        };
        view.rebuild();
        view
    }

    /// Replace the rows with a fresh fetch
    ///
    /// Sort and filter carry over. A filter whose status vanished from the
    /// new rows is dropped; the page is clamped to the new page count.
    pub fn replace_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if let Some(status) = self.status_filter
            && !self.has_status(status)
        {
            self.status_filter = None;
            self.page = 1;
        }
        self.rebuild();
    }

    /// Sort by `key`, or restore fetch order with `None`
    pub fn sort_by(&mut self, key: Option<T::SortKey>) {
        self.sort_by = key;
        self.rebuild();
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        self.direction = direction;
        self.rebuild();
    }

    pub fn toggle_direction(&mut self) {
        self.set_direction(self.direction.toggled());
    }

    /// Show only rows with `status`, or every row with `None`
    ///
    /// Always returns to the first page. Filtering on a status none of the
    /// rows has is rejected and leaves the view untouched.
    pub fn filter_status(&mut self, status: Option<T::Status>) -> Result<(), TableError> {
        if let Some(wanted) = status
            && !self.has_status(wanted)
        {
            return Err(TableError::StatusUnavailable(wanted.to_string()));
        }
        self.status_filter = status;
        self.page = 1;
        self.rebuild();
        Ok(())
    }

    /// Select `status`, or clear the filter if it is already selected
    pub fn toggle_status(&mut self, status: T::Status) -> Result<(), TableError> {
        if self.status_filter == Some(status) {
            self.filter_status(None)
        } else {
            self.filter_status(Some(status))
        }
    }

    /// Distinct statuses among the fetched rows, in order of first appearance
    pub fn available_statuses(&self) -> Vec<T::Status> {
        let mut seen = Vec::new();
        for row in &self.rows {
            let status = row.status();
            if !seen.contains(&status) {
                seen.push(status);
            }
        }
        seen
    }

    /// Jump to `page`, clamped to the valid range
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    pub fn next_page(&mut self) -> bool {
        if self.page < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Rows on the current page, in display order
    pub fn page_rows(&self) -> Vec<&T> {
        self.visible
            .iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .map(|&idx| &self.rows[idx])
            .collect()
    }

    /// Every row passing the filter, in display order
    pub fn visible_rows(&self) -> Vec<&T> {
        self.visible.iter().map(|&idx| &self.rows[idx]).collect()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages, never less than one
    pub fn page_count(&self) -> usize {
        self.visible.len().div_ceil(self.page_size).max(1)
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn sort_key(&self) -> Option<T::SortKey> {
        self.sort_by
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn status_filter(&self) -> Option<T::Status> {
        self.status_filter
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    fn has_status(&self, status: T::Status) -> bool {
        self.rows.iter().any(|row| row.status() == status)
    }

    fn rebuild(&mut self) {
        let filter = self.status_filter;
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| filter.is_none_or(|status| row.status() == status))
            .map(|(idx, _)| idx)
            .collect();

        if let Some(key) = self.sort_by {
            let rows = &self.rows;
            let direction = self.direction;
            // stable: equal rows keep fetch order in both directions
            self.visible.sort_by(|&a, &b| {
                let ord = rows[a].compare(&rows[b], key);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        self.page = self.page.clamp(1, self.page_count());
    }
}
