//! Validation rules for reproductive actions

use crate::schemas::{AnimalRecord, Biometrics};

use super::states::{
    classify, temperature_health, ReproductiveState, TemperatureHealth, ESTRUS_THRESHOLD,
    HEALTHY_TEMPERATURE_MAX, HEALTHY_TEMPERATURE_MIN,
};
use super::transitions::Action;

/// Longest accepted animal name
pub const MAX_NAME_LEN: usize = 50;

/// Lowest body condition score
pub const BODY_CONDITION_MIN: f64 = 1.0;

/// Highest body condition score
pub const BODY_CONDITION_MAX: f64 = 5.0;

/// Why an action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Malformed or out-of-range input
    Validation,
    /// The record's current state does not allow the action
    State,
}

/// Result of a validation check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Reason for failure (if valid is false)
    pub reason: Option<String>,

    /// Failure category (if valid is false)
    pub kind: Option<RejectionKind>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            reason: None,
            kind: None,
        }
    }

    /// Create a failed result caused by bad input
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            reason: Some(reason.into()),
            kind: Some(RejectionKind::Validation),
        }
    }

    /// Create a failed result caused by the record's state
    pub fn illegal_state(reason: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            reason: Some(reason.into()),
            kind: Some(RejectionKind::State),
        }
    }
}

/// Validate the body temperature gate shared by predictions and reevaluations
pub fn check_temperature(temperature: f64) -> ValidationResult {
    match temperature_health(temperature) {
        TemperatureHealth::Healthy => ValidationResult::success(),
        TemperatureHealth::Unhealthy => ValidationResult::invalid_input(format!(
            "temperature {} °C is outside the healthy range {}-{} °C; examine the animal before proceeding",
            temperature, HEALTHY_TEMPERATURE_MIN, HEALTHY_TEMPERATURE_MAX
        )),
    }
}

/// Validate biometric inputs for a new prediction or a reevaluation
pub fn validate_biometrics(biometrics: &Biometrics) -> ValidationResult {
    let name = biometrics.name.trim();
    if name.is_empty() {
        return ValidationResult::invalid_input("name must not be empty");
    }
    if name.chars().count() > MAX_NAME_LEN {
        return ValidationResult::invalid_input(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        ));
    }
    if !biometrics.body_condition.is_finite()
        || !(BODY_CONDITION_MIN..=BODY_CONDITION_MAX).contains(&biometrics.body_condition)
    {
        return ValidationResult::invalid_input(format!(
            "body condition {} is outside {}-{}",
            biometrics.body_condition, BODY_CONDITION_MIN, BODY_CONDITION_MAX
        ));
    }
    check_temperature(biometrics.temperature)
}

/// Validate reevaluating a record with new inputs
pub fn can_reevaluate(record: &AnimalRecord, biometrics: &Biometrics) -> ValidationResult {
    if record.pregnant() {
        return ValidationResult::illegal_state(
            "animal is pregnant and can no longer be reevaluated",
        );
    }
    if record.inseminated() {
        return ValidationResult::illegal_state(
            "animal is already inseminated and can no longer be reevaluated",
        );
    }
    validate_biometrics(biometrics)
}

/// Validate marking a record as inseminated
pub fn can_mark_inseminated(record: &AnimalRecord) -> ValidationResult {
    match classify(record) {
        ReproductiveState::PossibleEstrus => ValidationResult::success(),
        ReproductiveState::Open => ValidationResult::illegal_state(format!(
            "prediction score {:.2} is not above the estrus threshold {}",
            record.score, ESTRUS_THRESHOLD
        )),
        ReproductiveState::Inseminated => {
            ValidationResult::illegal_state("animal is already inseminated")
        }
        ReproductiveState::Pregnant => ValidationResult::illegal_state("animal is already pregnant"),
    }
}

/// Validate declaring a record pregnant
pub fn can_declare_pregnant(record: &AnimalRecord) -> ValidationResult {
    if record.pregnant() {
        return ValidationResult::illegal_state("animal is already pregnant");
    }
    if !record.inseminated() {
        return ValidationResult::illegal_state("animal has not been inseminated");
    }
    ValidationResult::success()
}

/// Validate reverting a record to inseminated after a failed pregnancy check
pub fn can_revert_to_inseminated(record: &AnimalRecord) -> ValidationResult {
    if !record.inseminated() {
        return ValidationResult::illegal_state("animal has not been inseminated");
    }
    ValidationResult::success()
}

/// Validate an action against a record's current state
pub fn validate_action(record: &AnimalRecord, action: &Action) -> ValidationResult {
    match action {
        Action::Reevaluate { biometrics, .. } => can_reevaluate(record, biometrics),
        Action::MarkInseminated => can_mark_inseminated(record),
        Action::DeclarePregnant => can_declare_pregnant(record),
        Action::RevertToInseminated => can_revert_to_inseminated(record),
        Action::Delete => ValidationResult::success(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{AnimalId, Breed, NewAnimal, ReproductiveStatus};
    use chrono::{TimeZone, Utc};

    fn inputs(temperature: f64) -> Biometrics {
        Biometrics {
            name: "Paloma".to_string(),
            activity: 510,
            temperature,
            days_postpartum: 62,
            body_condition: 3.25,
            breed: Breed::SiboneyDeCuba,
            assisted_birth: true,
        }
    }

    fn make_record(score: f64, status: ReproductiveStatus) -> AnimalRecord {
        AnimalRecord::new(
            AnimalId(3),
            NewAnimal {
                biometrics: inputs(38.0),
                score,
                scored_at: Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap(),
            },
        )
        .with_status(status)
    }

    fn inseminated() -> ReproductiveStatus {
        ReproductiveStatus::Inseminated {
            inseminated_at: Utc.with_ymd_and_hms(2024, 5, 2, 6, 0, 0).unwrap(),
        }
    }

    fn pregnant() -> ReproductiveStatus {
        ReproductiveStatus::Pregnant {
            inseminated_at: Utc.with_ymd_and_hms(2024, 5, 2, 6, 0, 0).unwrap(),
            pregnant_at: Utc.with_ymd_and_hms(2024, 6, 2, 6, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_check_temperature() {
        assert!(check_temperature(37.0).valid);
        assert!(check_temperature(39.0).valid);

        let result = check_temperature(39.5);
        assert!(!result.valid);
        assert_eq!(result.kind, Some(RejectionKind::Validation));
        assert!(result.reason.unwrap().contains("39.5"));
    }

    #[test]
    fn test_validate_biometrics_rejects_blank_name() {
        let mut biometrics = inputs(38.0);
        biometrics.name = "   ".to_string();
        let result = validate_biometrics(&biometrics);
        assert!(!result.valid);
        assert_eq!(result.reason, Some("name must not be empty".to_string()));
    }

    #[test]
    fn test_validate_biometrics_rejects_long_name() {
        let mut biometrics = inputs(38.0);
        biometrics.name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(!validate_biometrics(&biometrics).valid);
    }

    #[test]
    fn test_validate_biometrics_body_condition_range() {
        let mut biometrics = inputs(38.0);
        biometrics.body_condition = 5.5;
        assert!(!validate_biometrics(&biometrics).valid);
        biometrics.body_condition = 1.0;
        assert!(validate_biometrics(&biometrics).valid);
    }

    #[test]
    fn test_can_reevaluate() {
        let open = make_record(40.0, ReproductiveStatus::NotInseminated);
        assert!(can_reevaluate(&open, &inputs(38.0)).valid);

        let result = can_reevaluate(&open, &inputs(36.0));
        assert_eq!(result.kind, Some(RejectionKind::Validation));

        let result = can_reevaluate(&make_record(40.0, inseminated()), &inputs(38.0));
        assert_eq!(result.kind, Some(RejectionKind::State));
        assert!(result.reason.unwrap().contains("already inseminated"));

        let result = can_reevaluate(&make_record(40.0, pregnant()), &inputs(38.0));
        assert_eq!(result.kind, Some(RejectionKind::State));
    }

    #[test]
    fn test_reevaluate_state_is_checked_before_temperature() {
        let result = can_reevaluate(&make_record(40.0, inseminated()), &inputs(41.0));
        assert_eq!(result.kind, Some(RejectionKind::State));
    }

    #[test]
    fn test_can_mark_inseminated() {
        assert!(can_mark_inseminated(&make_record(85.0, ReproductiveStatus::NotInseminated)).valid);

        let result = can_mark_inseminated(&make_record(70.0, ReproductiveStatus::NotInseminated));
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("70.00"));

        let result = can_mark_inseminated(&make_record(85.0, inseminated()));
        assert_eq!(result.reason, Some("animal is already inseminated".to_string()));

        let result = can_mark_inseminated(&make_record(85.0, pregnant()));
        assert_eq!(result.reason, Some("animal is already pregnant".to_string()));
    }

    #[test]
    fn test_can_declare_pregnant() {
        assert!(can_declare_pregnant(&make_record(50.0, inseminated())).valid);

        let result = can_declare_pregnant(&make_record(85.0, ReproductiveStatus::NotInseminated));
        assert_eq!(result.reason, Some("animal has not been inseminated".to_string()));

        let result = can_declare_pregnant(&make_record(50.0, pregnant()));
        assert_eq!(result.reason, Some("animal is already pregnant".to_string()));
    }

    #[test]
    fn test_can_revert_to_inseminated() {
        assert!(can_revert_to_inseminated(&make_record(50.0, pregnant())).valid);
        assert!(can_revert_to_inseminated(&make_record(50.0, inseminated())).valid);
        assert!(!can_revert_to_inseminated(&make_record(90.0, ReproductiveStatus::NotInseminated)).valid);
    }

    #[test]
    fn test_validate_action_delete_always_allowed() {
        for status in [ReproductiveStatus::NotInseminated, inseminated(), pregnant()] {
            assert!(validate_action(&make_record(20.0, status), &Action::Delete).valid);
        }
    }
}
