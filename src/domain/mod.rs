//! Domain logic for reproductive states and transitions

mod states;
mod transitions;
mod validation;

// Property-based tests (compiled only in test builds)
#[cfg(test)]
mod property_tests;

pub use states::{
    classify, exceeds_estrus_threshold, is_estrus_candidate, temperature_health,
    ReproductiveState, TemperatureHealth, ESTRUS_THRESHOLD, HEALTHY_TEMPERATURE_MAX,
    HEALTHY_TEMPERATURE_MIN, REPRODUCTIVE_STATES,
};
pub use transitions::{
    allowed_actions, apply_action, new_prediction, Action, ActionKind, Rejection,
    TransitionResult,
};
pub use validation::{
    can_declare_pregnant, can_mark_inseminated, can_reevaluate, can_revert_to_inseminated,
    check_temperature, validate_action, validate_biometrics, RejectionKind, ValidationResult,
    MAX_NAME_LEN,
};
