//! Schema types for herdcycle
//!
//! Serde types for animal records, users, herd files and configuration.

mod animal;
mod config;
mod herd;
mod user;

pub use animal::{
    AnimalId, AnimalRecord, Biometrics, Breed, NewAnimal, ReproductiveStatus, MAX_SCORE,
};
pub use config::{Config, ScorerConfig, ScorerMode};
pub use herd::{HerdFile, UserDirectory};
pub use user::{User, UserRole};
