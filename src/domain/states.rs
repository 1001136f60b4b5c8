//! Reproductive state classification
//!
//! Every view derives an animal's state from the same record fields:
//! pregnant → inseminated → possible estrus (score > 70) → open.

use serde::{Deserialize, Serialize};

use crate::schemas::AnimalRecord;

/// Scores strictly above this value mark a possible estrus.
pub const ESTRUS_THRESHOLD: f64 = 70.0;

/// Lowest healthy body temperature (°C), inclusive
pub const HEALTHY_TEMPERATURE_MIN: f64 = 37.0;

/// Highest healthy body temperature (°C), inclusive
pub const HEALTHY_TEMPERATURE_MAX: f64 = 39.0;

/// Reproductive state derived from an animal record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReproductiveState {
    /// Not inseminated, score at or below the threshold
    Open,
    /// Not inseminated, score above the threshold
    PossibleEstrus,
    /// Inseminated, pregnancy not yet confirmed
    Inseminated,
    /// Pregnancy confirmed
    Pregnant,
}

/// All states in lifecycle order
pub const REPRODUCTIVE_STATES: &[ReproductiveState] = &[
    ReproductiveState::Open,
    ReproductiveState::PossibleEstrus,
    ReproductiveState::Inseminated,
    ReproductiveState::Pregnant,
];

impl ReproductiveState {
    /// Label shown in herd listings and reports
    pub fn herd_label(&self) -> &'static str {
        match self {
            ReproductiveState::Open => "No inseminada",
            ReproductiveState::PossibleEstrus => "Posible celo",
            ReproductiveState::Inseminated => "Inseminada",
            ReproductiveState::Pregnant => "Gestante",
        }
    }
}

impl std::fmt::Display for ReproductiveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReproductiveState::Open => write!(f, "open"),
            ReproductiveState::PossibleEstrus => write!(f, "possible_estrus"),
            ReproductiveState::Inseminated => write!(f, "inseminated"),
            ReproductiveState::Pregnant => write!(f, "pregnant"),
        }
    }
}

impl std::str::FromStr for ReproductiveState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ReproductiveState::Open),
            "possible_estrus" => Ok(ReproductiveState::PossibleEstrus),
            "inseminated" => Ok(ReproductiveState::Inseminated),
            "pregnant" => Ok(ReproductiveState::Pregnant),
            _ => Err(format!("Unknown reproductive state: {}", s)),
        }
    }
}

/// Whether a score is above the estrus threshold (strict comparison).
pub fn exceeds_estrus_threshold(score: f64) -> bool {
    score > ESTRUS_THRESHOLD
}

/// Derive the reproductive state of a record.
///
/// Total and pure: every record maps to exactly one state.
pub fn classify(record: &AnimalRecord) -> ReproductiveState {
    if record.pregnant() {
        ReproductiveState::Pregnant
    } else if record.inseminated() {
        ReproductiveState::Inseminated
    } else if exceeds_estrus_threshold(record.score) {
        ReproductiveState::PossibleEstrus
    } else {
        ReproductiveState::Open
    }
}

/// Whether the record belongs in the possible-estrus list
pub fn is_estrus_candidate(record: &AnimalRecord) -> bool {
    classify(record) == ReproductiveState::PossibleEstrus
}

/// Outcome of the body temperature check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureHealth {
    Healthy,
    /// Do not proceed with a reproductive action; examine the animal first
    Unhealthy,
}

/// Check a body temperature against the healthy range [37, 39] °C.
///
/// Independent of classification; it never changes a stored state.
pub fn temperature_health(temperature: f64) -> TemperatureHealth {
    if (HEALTHY_TEMPERATURE_MIN..=HEALTHY_TEMPERATURE_MAX).contains(&temperature) {
        TemperatureHealth::Healthy
    } else {
        TemperatureHealth::Unhealthy
    }
}
