//! State transition logic
//!
//! Pure functions for applying reproductive actions to animal records.

use chrono::{DateTime, Utc};

use crate::errors::HerdError;
use crate::schemas::{AnimalId, AnimalRecord, Biometrics, NewAnimal, ReproductiveStatus};

use super::validation::{
    can_declare_pregnant, can_mark_inseminated, can_revert_to_inseminated, validate_action,
    validate_biometrics, RejectionKind, ValidationResult,
};

/// An action requested on an existing record
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the biometric inputs with a freshly computed score
    Reevaluate { biometrics: Biometrics, score: f64 },
    /// Record an insemination
    MarkInseminated,
    /// Confirm a pregnancy
    DeclarePregnant,
    /// Failed pregnancy check: back to inseminated with a new insemination date
    RevertToInseminated,
    /// Remove the record
    Delete,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Reevaluate { .. } => ActionKind::Reevaluate,
            Action::MarkInseminated => ActionKind::MarkInseminated,
            Action::DeclarePregnant => ActionKind::DeclarePregnant,
            Action::RevertToInseminated => ActionKind::RevertToInseminated,
            Action::Delete => ActionKind::Delete,
        }
    }
}

/// Payload-free action discriminant, used for listing what a record allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Reevaluate,
    MarkInseminated,
    DeclarePregnant,
    RevertToInseminated,
    Delete,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Reevaluate => write!(f, "reevaluate"),
            ActionKind::MarkInseminated => write!(f, "inseminate"),
            ActionKind::DeclarePregnant => write!(f, "pregnant"),
            ActionKind::RevertToInseminated => write!(f, "revert"),
            ActionKind::Delete => write!(f, "delete"),
        }
    }
}

/// A refused action with its specific reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub reason: String,
}

impl Rejection {
    pub(crate) fn from_validation(result: ValidationResult) -> Self {
        Rejection {
            kind: result.kind.unwrap_or(RejectionKind::State),
            reason: result
                .reason
                .unwrap_or_else(|| "Transition validation failed".to_string()),
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl From<Rejection> for HerdError {
    fn from(rejection: Rejection) -> Self {
        match rejection.kind {
            RejectionKind::Validation => HerdError::Validation(rejection.reason),
            RejectionKind::State => HerdError::State(rejection.reason),
        }
    }
}

/// Result of a transition attempt
#[derive(Debug)]
pub enum TransitionResult {
    /// Accepted; the record to persist
    Success {
        /// The record with updated fields
        next_record: AnimalRecord,
    },
    /// Accepted delete
    Removed {
        /// Id of the removed record
        id: AnimalId,
    },
    /// Refused with a specific reason
    Error {
        /// Why the action was refused
        rejection: Rejection,
    },
}

impl TransitionResult {
    /// Check if the transition was accepted
    pub fn is_success(&self) -> bool {
        !self.is_error()
    }

    /// Check if the transition failed
    pub fn is_error(&self) -> bool {
        matches!(self, TransitionResult::Error { .. })
    }

    /// Get the next record if the transition produced one
    pub fn record(self) -> Option<AnimalRecord> {
        match self {
            TransitionResult::Success { next_record } => Some(next_record),
            _ => None,
        }
    }

    /// Get the rejection if the transition failed
    pub fn rejection(self) -> Option<Rejection> {
        match self {
            TransitionResult::Error { rejection } => Some(rejection),
            _ => None,
        }
    }
}

/// Build a new scored record after validating its inputs.
///
/// The store assigns the id once the record is persisted.
pub fn new_prediction(
    biometrics: Biometrics,
    score: f64,
    now: DateTime<Utc>,
) -> Result<NewAnimal, Rejection> {
    let validation = validate_biometrics(&biometrics);
    if !validation.valid {
        return Err(Rejection::from_validation(validation));
    }
    Ok(NewAnimal {
        biometrics: biometrics.normalized(),
        score,
        scored_at: now,
    })
}

/// Pure function that applies an action to a record.
///
/// This function:
/// - Never mutates the input record
/// - Validates the action before applying
/// - Returns the full next record (the delta to persist)
/// - Returns a specific rejection if the action is not allowed
pub fn apply_action(record: &AnimalRecord, action: &Action, now: DateTime<Utc>) -> TransitionResult {
    let validation = validate_action(record, action);
    if !validation.valid {
        return TransitionResult::Error {
            rejection: Rejection::from_validation(validation),
        };
    }

    let next_record = match action {
        Action::Reevaluate { biometrics, score } => {
            record
                .clone()
                .with_prediction(biometrics.clone().normalized(), *score, now)
        }
        Action::MarkInseminated => record.clone().with_status(ReproductiveStatus::Inseminated {
            inseminated_at: now,
        }),
        Action::DeclarePregnant => {
            // Validation guarantees the animal is inseminated here
            let inseminated_at = record.insemination_date().unwrap_or(now);
            record.clone().with_status(ReproductiveStatus::Pregnant {
                inseminated_at,
                pregnant_at: now,
            })
        }
        Action::RevertToInseminated => record.clone().with_status(ReproductiveStatus::Inseminated {
            inseminated_at: now,
        }),
        Action::Delete => return TransitionResult::Removed { id: record.id },
    };

    TransitionResult::Success { next_record }
}

/// Actions the record's current state allows
pub fn allowed_actions(record: &AnimalRecord) -> Vec<ActionKind> {
    let mut allowed = Vec::new();
    if !record.inseminated() {
        allowed.push(ActionKind::Reevaluate);
    }
    if can_mark_inseminated(record).valid {
        allowed.push(ActionKind::MarkInseminated);
    }
    if can_declare_pregnant(record).valid {
        allowed.push(ActionKind::DeclarePregnant);
    }
    if can_revert_to_inseminated(record).valid {
        allowed.push(ActionKind::RevertToInseminated);
    }
    allowed.push(ActionKind::Delete);
    allowed
}
