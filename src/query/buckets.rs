//! Herd views and bucketing
//!
//! Every view selects records through `classify`, so no screen can apply a
//! looser or stricter threshold than the classifier.

use crate::domain::{classify, ReproductiveState};
use crate::schemas::AnimalRecord;

use super::sort::{SortConfig, SortDirection, SortKey};

/// A standard herd view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HerdView {
    /// Full prediction history, unfiltered
    All,
    /// Not inseminated, score above the threshold
    PossibleEstrus,
    /// Inseminated, pregnancy not yet confirmed
    InseminatedPending,
    /// Pregnancy confirmed
    Pregnant,
}

impl HerdView {
    /// The classified state this view selects, or `None` for the full history
    pub fn state(&self) -> Option<ReproductiveState> {
        match self {
            HerdView::All => None,
            HerdView::PossibleEstrus => Some(ReproductiveState::PossibleEstrus),
            HerdView::InseminatedPending => Some(ReproductiveState::Inseminated),
            HerdView::Pregnant => Some(ReproductiveState::Pregnant),
        }
    }

    /// Whether a record belongs in this view
    pub fn includes(&self, record: &AnimalRecord) -> bool {
        match self.state() {
            None => true,
            Some(state) => classify(record) == state,
        }
    }

    /// Sort applied when a view is first opened.
    ///
    /// The history lists the newest predictions first; bucket views keep
    /// the store's order until a column is chosen.
    pub fn default_sort(&self) -> Option<SortConfig> {
        match self {
            HerdView::All => Some(SortConfig {
                key: SortKey::ScoredAt,
                direction: SortDirection::Descending,
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for HerdView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HerdView::All => write!(f, "all"),
            HerdView::PossibleEstrus => write!(f, "estrus"),
            HerdView::InseminatedPending => write!(f, "inseminated"),
            HerdView::Pregnant => write!(f, "pregnant"),
        }
    }
}

impl std::str::FromStr for HerdView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "history" => Ok(HerdView::All),
            "estrus" | "possible_estrus" => Ok(HerdView::PossibleEstrus),
            "inseminated" => Ok(HerdView::InseminatedPending),
            "pregnant" => Ok(HerdView::Pregnant),
            _ => Err(format!("Unknown view: {}", s)),
        }
    }
}

/// The herd split into its mutually exclusive buckets
#[derive(Debug, Clone, Default)]
pub struct HerdBuckets<'a> {
    pub open: Vec<&'a AnimalRecord>,
    pub possible_estrus: Vec<&'a AnimalRecord>,
    pub inseminated_pending: Vec<&'a AnimalRecord>,
    pub pregnant: Vec<&'a AnimalRecord>,
}

impl<'a> HerdBuckets<'a> {
    /// Records of one view; `All` is not a bucket and yields nothing here
    pub fn view(&self, view: HerdView) -> &[&'a AnimalRecord] {
        match view {
            HerdView::All => &[],
            HerdView::PossibleEstrus => &self.possible_estrus,
            HerdView::InseminatedPending => &self.inseminated_pending,
            HerdView::Pregnant => &self.pregnant,
        }
    }

    /// Total number of records across all buckets
    pub fn len(&self) -> usize {
        self.open.len()
            + self.possible_estrus.len()
            + self.inseminated_pending.len()
            + self.pregnant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split records into buckets in one pass, preserving input order
pub fn partition(records: &[AnimalRecord]) -> HerdBuckets<'_> {
    let mut buckets = HerdBuckets::default();
    for record in records {
        match classify(record) {
            ReproductiveState::Open => buckets.open.push(record),
            ReproductiveState::PossibleEstrus => buckets.possible_estrus.push(record),
            ReproductiveState::Inseminated => buckets.inseminated_pending.push(record),
            ReproductiveState::Pregnant => buckets.pregnant.push(record),
        }
    }
    buckets
}

/// Records selected by a view, in input order
pub fn select(records: &[AnimalRecord], view: HerdView) -> Vec<&AnimalRecord> {
    records.iter().filter(|r| view.includes(r)).collect()
}

/// Keep records whose name contains `query`, ignoring case.
///
/// Blank queries keep everything. Other queries match as typed, spaces
/// included.
pub fn filter_by_name<'a>(records: Vec<&'a AnimalRecord>, query: &str) -> Vec<&'a AnimalRecord> {
    if query.trim().is_empty() {
        return records;
    }
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.name().to_lowercase().contains(&needle))
        .collect()
}
