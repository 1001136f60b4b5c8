//! Property-based tests for domain logic
//!
//! These tests use proptest to verify invariants across many random inputs.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    use crate::domain::states::{classify, ReproductiveState, ESTRUS_THRESHOLD};
    use crate::domain::transitions::{apply_action, Action, TransitionResult};
    use crate::query::{
        partition, request_sort, run_view, sort_records, summarize, HerdView, SortConfig,
        SortKey, ViewQuery,
    };
    use crate::schemas::{
        AnimalId, AnimalRecord, Biometrics, Breed, NewAnimal, ReproductiveStatus,
    };

    // ===== STRATEGY HELPERS =====

    fn origin() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn any_breed() -> impl Strategy<Value = Breed> {
        (0..Breed::ALL.len()).prop_map(|i| Breed::ALL[i])
    }

    fn any_biometrics() -> impl Strategy<Value = Biometrics> {
        (
            "[A-Za-z]{1,12}",
            0u32..2000,
            36.0f64..40.0,
            0u32..400,
            1.0f64..=5.0,
            any_breed(),
            any::<bool>(),
        )
            .prop_map(
                |(name, activity, temperature, days_postpartum, body_condition, breed, assisted_birth)| {
                    Biometrics {
                        name,
                        activity,
                        temperature,
                        days_postpartum,
                        body_condition,
                        breed,
                        assisted_birth,
                    }
                },
            )
    }

    fn any_status() -> impl Strategy<Value = ReproductiveStatus> {
        (0u8..3, 0i64..500, 0i64..500).prop_map(|(tag, a, b)| {
            let inseminated_at = origin() + Duration::hours(a);
            match tag {
                0 => ReproductiveStatus::NotInseminated,
                1 => ReproductiveStatus::Inseminated { inseminated_at },
                _ => ReproductiveStatus::Pregnant {
                    inseminated_at,
                    pregnant_at: inseminated_at + Duration::hours(b),
                },
            }
        })
    }

    /// Generate a random record in any lifecycle state
    fn any_record() -> impl Strategy<Value = AnimalRecord> {
        (1u64..10_000, any_biometrics(), 0.0f64..=100.0, 0i64..1000, any_status()).prop_map(
            |(id, biometrics, score, hours, status)| {
                AnimalRecord::new(
                    AnimalId(id),
                    NewAnimal {
                        biometrics,
                        score,
                        scored_at: origin() + Duration::hours(hours),
                    },
                )
                .with_status(status)
            },
        )
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (any_biometrics(), 0.0f64..=96.0)
                .prop_map(|(biometrics, score)| Action::Reevaluate { biometrics, score }),
            Just(Action::MarkInseminated),
            Just(Action::DeclarePregnant),
            Just(Action::RevertToInseminated),
        ]
    }

    fn any_herd() -> impl Strategy<Value = Vec<AnimalRecord>> {
        prop::collection::vec(any_record(), 0..20)
    }

    fn any_sort_key() -> impl Strategy<Value = SortKey> {
        prop_oneof![
            Just(SortKey::Name),
            Just(SortKey::ScoredAt),
            Just(SortKey::Score),
            Just(SortKey::Activity),
            Just(SortKey::Breed),
            Just(SortKey::AssistedBirth),
            Just(SortKey::State),
            Just(SortKey::InseminatedAt),
        ]
    }

    // ===== LIFECYCLE TESTS =====

    proptest! {
        /// Property: pregnant implies inseminated after any accepted action sequence
        #[test]
        fn test_pregnant_implies_inseminated(
            record in any_record(),
            actions in prop::collection::vec(any_action(), 0..12)
        ) {
            let mut current = record;
            let mut now = origin() + Duration::days(60);
            for action in &actions {
                now += Duration::hours(1);
                if let TransitionResult::Success { next_record } = apply_action(&current, action, now) {
                    current = next_record;
                }
                prop_assert!(!current.pregnant() || current.inseminated());
                prop_assert_eq!(current.pregnant(), current.pregnancy_date().is_some());
                prop_assert_eq!(current.inseminated(), current.insemination_date().is_some());
            }
        }

        /// Property: apply_action never mutates its input
        #[test]
        fn test_apply_action_never_mutates(record in any_record(), action in any_action()) {
            let original = record.clone();
            let _ = apply_action(&record, &action, origin());
            prop_assert_eq!(record, original);
        }

        /// Property: a rejected action produces no record
        #[test]
        fn test_rejection_has_no_record(record in any_record(), action in any_action()) {
            let result = apply_action(&record, &action, origin());
            if result.is_error() {
                prop_assert!(result.record().is_none());
            }
        }

        /// Property: inseminated records can never be reevaluated
        #[test]
        fn test_inseminated_records_are_frozen(
            record in any_record(),
            biometrics in any_biometrics(),
            score in 0.0f64..=96.0
        ) {
            prop_assume!(record.inseminated());
            let result = apply_action(&record, &Action::Reevaluate { biometrics, score }, origin());
            prop_assert!(result.is_error());
        }
    }

    // ===== CLASSIFIER TESTS =====

    proptest! {
        /// Property: the estrus threshold is strict
        #[test]
        fn test_threshold_is_strict(record in any_record()) {
            let record = record.with_status(ReproductiveStatus::NotInseminated);
            let expected = if record.score > ESTRUS_THRESHOLD {
                ReproductiveState::PossibleEstrus
            } else {
                ReproductiveState::Open
            };
            prop_assert_eq!(classify(&record), expected);
        }

        /// Property: buckets are disjoint and, with open, cover the herd
        #[test]
        fn test_buckets_partition_herd(herd in any_herd()) {
            let buckets = partition(&herd);
            prop_assert_eq!(buckets.len(), herd.len());

            let summary = summarize(&herd);
            prop_assert!(summary.is_consistent());
            prop_assert_eq!(
                summary.possible_estrus + summary.inseminated + summary.pregnant + summary.open,
                summary.total
            );
        }
    }

    // ===== QUERY TESTS =====

    proptest! {
        /// Property: the view pipeline is idempotent on an unchanged herd
        #[test]
        fn test_run_view_idempotent(
            herd in any_herd(),
            filter in "[a-z]{0,2}",
            key in any_sort_key()
        ) {
            let query = ViewQuery::new(HerdView::All)
                .with_name_filter(filter)
                .with_sort(Some(SortConfig::descending(key)));
            let first: Vec<AnimalId> = run_view(&herd, &query).iter().map(|r| r.id).collect();
            let second: Vec<AnimalId> = run_view(&herd, &query).iter().map(|r| r.id).collect();
            prop_assert_eq!(first, second);
        }

        /// Property: ascending, descending, ascending returns the first order
        #[test]
        fn test_sort_toggle_is_stable(herd in any_herd(), key in any_sort_key()) {
            let ascending = request_sort(None, key);
            let descending = request_sort(Some(ascending), key);
            let again = request_sort(Some(descending), key);
            prop_assert_eq!(ascending, again);

            let mut first: Vec<&AnimalRecord> = herd.iter().collect();
            sort_records(&mut first, ascending);
            let mut rows = first.clone();
            sort_records(&mut rows, descending);
            sort_records(&mut rows, again);

            let first_ids: Vec<AnimalId> = first.iter().map(|r| r.id).collect();
            let row_ids: Vec<AnimalId> = rows.iter().map(|r| r.id).collect();
            prop_assert_eq!(first_ids, row_ids);
        }
    }
}
