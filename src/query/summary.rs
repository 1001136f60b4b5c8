//! Dashboard aggregates

use serde::Serialize;

use crate::schemas::AnimalRecord;

use super::buckets::partition;

/// Aggregate counts and averages over the whole herd
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HerdSummary {
    /// Number of records
    pub total: usize,

    /// Records in the possible-estrus bucket
    pub possible_estrus: usize,

    /// Records inseminated and awaiting confirmation
    pub inseminated: usize,

    /// Records with confirmed pregnancy
    pub pregnant: usize,

    /// Records classified as open
    pub open: usize,

    /// Total minus the three action buckets
    pub other: usize,

    /// Mean prediction score across all records (0.0 when empty)
    pub mean_score: f64,
}

impl HerdSummary {
    /// Mean score rendered with two decimals
    pub fn mean_score_display(&self) -> String {
        format!("{:.2}", self.mean_score)
    }

    /// The remainder bucket must hold exactly the open records
    pub fn is_consistent(&self) -> bool {
        self.other == self.open
    }
}

/// Compute the herd summary from the authoritative collection
pub fn summarize(records: &[AnimalRecord]) -> HerdSummary {
    let buckets = partition(records);
    let total = records.len();
    let possible_estrus = buckets.possible_estrus.len();
    let inseminated = buckets.inseminated_pending.len();
    let pregnant = buckets.pregnant.len();

    let mean_score = if total == 0 {
        0.0
    } else {
        records.iter().map(|r| r.score).sum::<f64>() / total as f64
    };

    HerdSummary {
        total,
        possible_estrus,
        inseminated,
        pregnant,
        open: buckets.open.len(),
        other: total - (possible_estrus + inseminated + pregnant),
        mean_score,
    }
}
