//! Animal schema - One tracked cow and its reproductive lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of a prediction score (percent)
pub const MAX_SCORE: f64 = 100.0;

/// Opaque animal identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(pub u64);

impl std::fmt::Display for AnimalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AnimalId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(AnimalId)
            .map_err(|_| format!("Invalid animal id: {}", s))
    }
}

/// Breed of an animal, stored by its three-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Breed {
    #[serde(rename = "SIB")]
    SiboneyDeCuba,
    #[serde(rename = "MAM")]
    MambiDeCuba,
    #[serde(rename = "TAI")]
    Taino,
    #[serde(rename = "CRI")]
    Criolla,
    #[serde(rename = "CEB")]
    Cebu,
    #[serde(rename = "CRU")]
    Cruzamiento,
    #[serde(rename = "CHA")]
    Chacuba,
    #[serde(rename = "HOL")]
    Holstein,
}

impl Breed {
    /// All breeds in their canonical order
    pub const ALL: [Breed; 8] = [
        Breed::SiboneyDeCuba,
        Breed::MambiDeCuba,
        Breed::Taino,
        Breed::Criolla,
        Breed::Cebu,
        Breed::Cruzamiento,
        Breed::Chacuba,
        Breed::Holstein,
    ];

    /// Three-letter breed code
    pub fn code(&self) -> &'static str {
        match self {
            Breed::SiboneyDeCuba => "SIB",
            Breed::MambiDeCuba => "MAM",
            Breed::Taino => "TAI",
            Breed::Criolla => "CRI",
            Breed::Cebu => "CEB",
            Breed::Cruzamiento => "CRU",
            Breed::Chacuba => "CHA",
            Breed::Holstein => "HOL",
        }
    }

    /// Human-readable breed name
    pub fn label(&self) -> &'static str {
        match self {
            Breed::SiboneyDeCuba => "Siboney de Cuba",
            Breed::MambiDeCuba => "Mambi de Cuba",
            Breed::Taino => "Taino",
            Breed::Criolla => "Criolla",
            Breed::Cebu => "Cebu",
            Breed::Cruzamiento => "Cruzamiento",
            Breed::Chacuba => "Chacuba",
            Breed::Holstein => "Holstein",
        }
    }
}

impl std::fmt::Display for Breed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Breed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Breed::ALL
            .iter()
            .copied()
            .find(|b| b.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown breed code: {}", s))
    }
}

/// Biometric inputs submitted for a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    /// Animal name
    pub name: String,

    /// Physical activity (steps/day)
    pub activity: u32,

    /// Body temperature in °C
    pub temperature: f64,

    /// Days since the last calving
    pub days_postpartum: u32,

    /// Body condition score (1-5)
    pub body_condition: f64,

    /// Breed code
    pub breed: Breed,

    /// Whether the previous calving was assisted
    pub assisted_birth: bool,
}

impl Biometrics {
    /// Inputs as stored: the name without surrounding whitespace
    pub fn normalized(mut self) -> Self {
        let trimmed = self.name.trim();
        if trimmed.len() != self.name.len() {
            self.name = trimmed.to_string();
        }
        self
    }
}

/// Reproductive lifecycle of an animal.
///
/// The legacy `inseminated`/`pregnant` flags are derived from this variant,
/// so a pregnant animal that was never inseminated cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReproductiveStatus {
    NotInseminated,
    Inseminated {
        inseminated_at: DateTime<Utc>,
    },
    Pregnant {
        inseminated_at: DateTime<Utc>,
        pregnant_at: DateTime<Utc>,
    },
}

impl ReproductiveStatus {
    pub fn is_inseminated(&self) -> bool {
        !matches!(self, ReproductiveStatus::NotInseminated)
    }

    pub fn is_pregnant(&self) -> bool {
        matches!(self, ReproductiveStatus::Pregnant { .. })
    }

    pub fn inseminated_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ReproductiveStatus::NotInseminated => None,
            ReproductiveStatus::Inseminated { inseminated_at }
            | ReproductiveStatus::Pregnant { inseminated_at, .. } => Some(*inseminated_at),
        }
    }

    pub fn pregnant_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ReproductiveStatus::Pregnant { pregnant_at, .. } => Some(*pregnant_at),
            _ => None,
        }
    }

    /// Rebuild the status from the flat flag encoding used on the wire.
    ///
    /// Rejects every combination the variant cannot represent: a pregnant
    /// animal that is not inseminated, a flag without its date, or a date
    /// without its flag.
    pub fn from_flags(
        inseminated: bool,
        inseminated_at: Option<DateTime<Utc>>,
        pregnant: bool,
        pregnant_at: Option<DateTime<Utc>>,
    ) -> Result<Self, String> {
        match (inseminated, inseminated_at, pregnant, pregnant_at) {
            (false, None, false, None) => Ok(ReproductiveStatus::NotInseminated),
            (true, Some(inseminated_at), false, None) => {
                Ok(ReproductiveStatus::Inseminated { inseminated_at })
            }
            (true, Some(inseminated_at), true, Some(pregnant_at)) => {
                Ok(ReproductiveStatus::Pregnant {
                    inseminated_at,
                    pregnant_at,
                })
            }
            (false, _, true, _) => Err("pregnant animal must be inseminated".to_string()),
            (true, None, _, _) => Err("inseminated animal is missing inseminated_at".to_string()),
            (false, Some(_), _, _) => {
                Err("inseminated_at is set but animal is not inseminated".to_string())
            }
            (_, _, true, None) => Err("pregnant animal is missing pregnant_at".to_string()),
            (_, _, false, Some(_)) => {
                Err("pregnant_at is set but animal is not pregnant".to_string())
            }
        }
    }
}

/// A scored record awaiting an id from the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnimal {
    pub biometrics: Biometrics,
    pub score: f64,
    pub scored_at: DateTime<Utc>,
}

/// One tracked animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnimalRecordWire", into = "AnimalRecordWire")]
pub struct AnimalRecord {
    /// Store-assigned identifier
    pub id: AnimalId,

    /// Inputs the current score was computed from
    pub biometrics: Biometrics,

    /// Probability of estrus in percent, [0, 100]
    pub score: f64,

    /// When the current score was computed
    pub scored_at: DateTime<Utc>,

    /// Reproductive lifecycle
    pub status: ReproductiveStatus,
}

impl AnimalRecord {
    /// Create a freshly scored, not inseminated record
    pub fn new(id: AnimalId, animal: NewAnimal) -> Self {
        AnimalRecord {
            id,
            biometrics: animal.biometrics,
            score: animal.score,
            scored_at: animal.scored_at,
            status: ReproductiveStatus::NotInseminated,
        }
    }

    pub fn name(&self) -> &str {
        &self.biometrics.name
    }

    pub fn inseminated(&self) -> bool {
        self.status.is_inseminated()
    }

    pub fn pregnant(&self) -> bool {
        self.status.is_pregnant()
    }

    pub fn insemination_date(&self) -> Option<DateTime<Utc>> {
        self.status.inseminated_at()
    }

    pub fn pregnancy_date(&self) -> Option<DateTime<Utc>> {
        self.status.pregnant_at()
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new record with the given lifecycle status
    pub fn with_status(mut self, status: ReproductiveStatus) -> Self {
        self.status = status;
        self
    }

    /// Return a new record with replaced inputs and a new score
    pub fn with_prediction(
        mut self,
        biometrics: Biometrics,
        score: f64,
        scored_at: DateTime<Utc>,
    ) -> Self {
        self.biometrics = biometrics;
        self.score = score;
        self.scored_at = scored_at;
        self
    }
}

/// Flat wire format: the lifecycle travels as independent flags and dates
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnimalRecordWire {
    id: AnimalId,
    #[serde(flatten)]
    biometrics: Biometrics,
    score: f64,
    scored_at: DateTime<Utc>,
    #[serde(default)]
    inseminated: bool,
    #[serde(default)]
    inseminated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pregnant: bool,
    #[serde(default)]
    pregnant_at: Option<DateTime<Utc>>,
}

impl TryFrom<AnimalRecordWire> for AnimalRecord {
    type Error = String;

    fn try_from(wire: AnimalRecordWire) -> Result<Self, Self::Error> {
        if !wire.score.is_finite() || !(0.0..=MAX_SCORE).contains(&wire.score) {
            return Err(format!(
                "animal {}: score {} is outside [0, 100]",
                wire.id, wire.score
            ));
        }
        let status = ReproductiveStatus::from_flags(
            wire.inseminated,
            wire.inseminated_at,
            wire.pregnant,
            wire.pregnant_at,
        )
        .map_err(|e| format!("animal {}: {}", wire.id, e))?;

        Ok(AnimalRecord {
            id: wire.id,
            biometrics: wire.biometrics,
            score: wire.score,
            scored_at: wire.scored_at,
            status,
        })
    }
}

impl From<AnimalRecord> for AnimalRecordWire {
    fn from(record: AnimalRecord) -> Self {
        AnimalRecordWire {
            id: record.id,
            inseminated: record.inseminated(),
            inseminated_at: record.insemination_date(),
            pregnant: record.pregnant(),
            pregnant_at: record.pregnancy_date(),
            biometrics: record.biometrics,
            score: record.score,
            scored_at: record.scored_at,
        }
    }
}
