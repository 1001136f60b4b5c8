//! Column sorting for herd views

use std::cmp::Ordering;

use crate::domain::classify;
use crate::schemas::AnimalRecord;

/// Field a view can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    ScoredAt,
    Score,
    Activity,
    Temperature,
    DaysPostpartum,
    BodyCondition,
    Breed,
    AssistedBirth,
    State,
    InseminatedAt,
    PregnantAt,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortKey::Name => "name",
            SortKey::ScoredAt => "scored_at",
            SortKey::Score => "score",
            SortKey::Activity => "activity",
            SortKey::Temperature => "temperature",
            SortKey::DaysPostpartum => "days_postpartum",
            SortKey::BodyCondition => "body_condition",
            SortKey::Breed => "breed",
            SortKey::AssistedBirth => "assisted_birth",
            SortKey::State => "state",
            SortKey::InseminatedAt => "inseminated_at",
            SortKey::PregnantAt => "pregnant_at",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "scored_at" | "date" => Ok(SortKey::ScoredAt),
            "score" => Ok(SortKey::Score),
            "activity" => Ok(SortKey::Activity),
            "temperature" => Ok(SortKey::Temperature),
            "days_postpartum" => Ok(SortKey::DaysPostpartum),
            "body_condition" => Ok(SortKey::BodyCondition),
            "breed" => Ok(SortKey::Breed),
            "assisted_birth" => Ok(SortKey::AssistedBirth),
            "state" => Ok(SortKey::State),
            "inseminated_at" => Ok(SortKey::InseminatedAt),
            "pregnant_at" => Ok(SortKey::PregnantAt),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
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
}

/// Active sort of a view: one key, one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Ascending sort on `key`
    pub fn ascending(key: SortKey) -> Self {
        SortConfig {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Sort on `key` descending
    pub fn descending(key: SortKey) -> Self {
        SortConfig {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Sort after the user picks `key` while this sort is active
    pub fn request(self, key: SortKey) -> Self {
        request_sort(Some(self), key)
    }
}

/// Next sort after the user picks `key`.
///
/// Picking the active key toggles its direction; a new key starts ascending.
pub fn request_sort(current: Option<SortConfig>, key: SortKey) -> SortConfig {
    match current {
        Some(active) if active.key == key => SortConfig {
            key,
            direction: active.direction.toggled(),
        },
        _ => SortConfig::ascending(key),
    }
}

/// Three-way compare of two records on one field, ascending.
///
/// Text compares lexicographically, numbers numerically, dates
/// chronologically with missing dates first.
pub fn compare_by(a: &AnimalRecord, b: &AnimalRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name().cmp(b.name()),
        SortKey::ScoredAt => a.scored_at.cmp(&b.scored_at),
        SortKey::Score => a.score.total_cmp(&b.score),
        SortKey::Activity => a.biometrics.activity.cmp(&b.biometrics.activity),
        SortKey::Temperature => a.biometrics.temperature.total_cmp(&b.biometrics.temperature),
        SortKey::DaysPostpartum => a
            .biometrics
            .days_postpartum
            .cmp(&b.biometrics.days_postpartum),
        SortKey::BodyCondition => a
            .biometrics
            .body_condition
            .total_cmp(&b.biometrics.body_condition),
        SortKey::Breed => a.biometrics.breed.code().cmp(b.biometrics.breed.code()),
        SortKey::AssistedBirth => a.biometrics.assisted_birth.cmp(&b.biometrics.assisted_birth),
        SortKey::State => classify(a).cmp(&classify(b)),
        SortKey::InseminatedAt => a.insemination_date().cmp(&b.insemination_date()),
        SortKey::PregnantAt => a.pregnancy_date().cmp(&b.pregnancy_date()),
    }
}

/// Stable sort of records in place.
///
/// Descending reverses the comparator, not the output, so records with
/// equal keys keep their relative order in both directions.
pub fn sort_records(records: &mut [&AnimalRecord], config: SortConfig) {
    records.sort_by(|a, b| {
        let ordering = compare_by(a, b, config.key);
        match config.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::{herd, record};

    fn ids(records: &[&AnimalRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn test_request_sort_toggles_same_key() {
        let first = request_sort(None, SortKey::Score);
        assert_eq!(first, SortConfig::ascending(SortKey::Score));

        let second = request_sort(Some(first), SortKey::Score);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = request_sort(Some(second), SortKey::Score);
        assert_eq!(third.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_request_sort_new_key_resets_to_ascending() {
        let current = SortConfig::descending(SortKey::Score);
        assert_eq!(
            request_sort(Some(current), SortKey::Name),
            SortConfig::ascending(SortKey::Name)
        );
        assert_eq!(
            current.request(SortKey::Score),
            SortConfig::ascending(SortKey::Score)
        );
    }

    #[test]
    fn test_sort_by_score_numeric() {
        let records = herd();
        let mut view: Vec<&AnimalRecord> = records.iter().collect();
        sort_records(&mut view, SortConfig::ascending(SortKey::Score));

        let scores: Vec<f64> = view.iter().map(|r| r.score).collect();
        let mut expected = scores.clone();
        expected.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(scores, expected);
    }

    #[test]
    fn test_sort_by_name_lexicographic() {
        let records = herd();
        let mut view: Vec<&AnimalRecord> = records.iter().collect();
        sort_records(&mut view, SortConfig::descending(SortKey::Name));
        assert_eq!(view.first().unwrap().name(), "Nube");
        assert_eq!(view.last().unwrap().name(), "Bruma");
    }

    #[test]
    fn test_missing_dates_sort_first_ascending() {
        let records = herd();
        let mut view: Vec<&AnimalRecord> = records.iter().collect();
        sort_records(&mut view, SortConfig::ascending(SortKey::InseminatedAt));
        assert!(view[0].insemination_date().is_none());
        assert!(view.last().unwrap().insemination_date().is_some());
    }

    #[test]
    fn test_sort_is_stable_across_direction_changes() {
        let records = vec![
            record(1, "A", 80.0),
            record(2, "B", 50.0),
            record(3, "C", 80.0),
            record(4, "D", 50.0),
        ];
        let mut view: Vec<&AnimalRecord> = records.iter().collect();

        sort_records(&mut view, SortConfig::ascending(SortKey::Score));
        assert_eq!(ids(&view), vec![2, 4, 1, 3]);

        sort_records(&mut view, SortConfig::descending(SortKey::Score));
        assert_eq!(ids(&view), vec![1, 3, 2, 4]);

        sort_records(&mut view, SortConfig::ascending(SortKey::Score));
        assert_eq!(ids(&view), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_key_parse_and_display() {
        for key in [
            SortKey::Name,
            SortKey::ScoredAt,
            SortKey::Score,
            SortKey::Breed,
            SortKey::PregnantAt,
        ] {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!("date".parse::<SortKey>().unwrap(), SortKey::ScoredAt);
        assert!("color".parse::<SortKey>().is_err());
    }
}
