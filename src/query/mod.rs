//! Query engine: views, filters, sorting, aggregates and report projections
//!
//! Every screen runs the same pipeline over the same collection:
//! select by view → filter by name → stable sort.

mod buckets;
mod report;
mod sort;
mod summary;

pub use buckets::{filter_by_name, partition, select, HerdBuckets, HerdView};
pub use report::{project_report, project_rows, Report, ReportKind, REPORT_KINDS};
pub use sort::{compare_by, request_sort, sort_records, SortConfig, SortDirection, SortKey};
pub use summary::{summarize, HerdSummary};

use crate::schemas::AnimalRecord;

/// What a screen is showing: view, name filter and active sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    pub view: HerdView,
    pub name_filter: String,
    pub sort: Option<SortConfig>,
}

impl ViewQuery {
    /// Query for a view with its default sort and no filter
    pub fn new(view: HerdView) -> Self {
        ViewQuery {
            view,
            name_filter: String::new(),
            sort: view.default_sort(),
        }
    }

    pub fn with_name_filter(mut self, filter: impl Into<String>) -> Self {
        self.name_filter = filter.into();
        self
    }

    pub fn with_sort(mut self, sort: Option<SortConfig>) -> Self {
        self.sort = sort;
        self
    }

    /// Apply a column click: same key toggles, new key sorts ascending
    pub fn request_sort(&mut self, key: SortKey) {
        self.sort = Some(request_sort(self.sort, key));
    }
}

/// Run the view pipeline from scratch over the full collection
pub fn run_view<'a>(records: &'a [AnimalRecord], query: &ViewQuery) -> Vec<&'a AnimalRecord> {
    let mut rows = filter_by_name(select(records, query.view), &query.name_filter);
    if let Some(sort) = query.sort {
        sort_records(&mut rows, sort);
    }
    rows
}
