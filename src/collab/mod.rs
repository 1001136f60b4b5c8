//! Collaborator boundary
//!
//! The engine never persists or scores anything itself. It talks to a
//! `HerdStore` for records and users and to a `Scorer` for prediction
//! scores. In-memory and file-backed stores plus fixed and process-based
//! scorers are provided.

mod json_store;
mod memory;
mod scorer;

pub use json_store::JsonHerdStore;
pub use memory::MemoryStore;
pub use scorer::{build_scorer, parse_scorer_output, FixedScorer, ProcessScorer};

use async_trait::async_trait;

use crate::errors::{HerdError, Result};
use crate::schemas::{AnimalId, AnimalRecord, Biometrics, NewAnimal, User, MAX_SCORE};

/// Highest score the engine stores; model output above it is capped.
pub const SCORE_CAP: f64 = 96.0;

/// Record persistence owned by the backend.
///
/// Guarantees:
/// - `fetch_herd()` returns records in store order, with no implied sort.
/// - `insert()` assigns a fresh id that is never reused.
/// - `update()` fails with `NotFound` when the id is absent.
/// - `delete()` is idempotent and returns `false` when already absent.
#[async_trait]
pub trait HerdStore: Send + Sync {
    /// Fetch every record
    async fn fetch_herd(&self) -> Result<Vec<AnimalRecord>>;

    /// Persist a newly scored animal and return it with its id
    async fn insert(&self, animal: NewAnimal) -> Result<AnimalRecord>;

    /// Replace a record by id
    async fn update(&self, record: AnimalRecord) -> Result<AnimalRecord>;

    /// Remove a record by id
    async fn delete(&self, id: AnimalId) -> Result<bool>;

    /// List the herd's user directory
    async fn list_users(&self) -> Result<Vec<User>>;
}

/// Opaque prediction model.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Probability of estrus in percent for the given inputs
    async fn score(&self, biometrics: &Biometrics) -> Result<f64>;
}

/// Check a raw scorer value and apply the storage cap.
///
/// Values that are not finite, negative or above 100 are an unexpected
/// shape from the collaborator, not something to clamp.
pub fn normalize_score(raw: f64) -> Result<f64> {
    if !raw.is_finite() || !(0.0..=MAX_SCORE).contains(&raw) {
        return Err(HerdError::Collaborator(format!(
            "scorer returned {} which is outside [0, {}]",
            raw, MAX_SCORE
        )));
    }
    Ok(raw.min(SCORE_CAP))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_score_caps_high_values() {
        assert_eq!(normalize_score(99.3).unwrap(), SCORE_CAP);
        assert_eq!(normalize_score(100.0).unwrap(), SCORE_CAP);
        assert_eq!(normalize_score(85.0).unwrap(), 85.0);
        assert_eq!(normalize_score(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_normalize_score_rejects_bad_values() {
        for raw in [f64::NAN, f64::INFINITY, -0.5, 100.01] {
            let err = normalize_score(raw).unwrap_err();
            assert_eq!(err.code(), "COLLABORATOR_ERROR");
        }
    }
}
