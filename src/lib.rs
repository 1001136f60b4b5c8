//! Herdcycle - Reproductive status engine for dairy herds
//!
//! This library provides the core functionality for the herdcycle CLI, including:
//! - Schema definitions for animals, users and configuration
//! - Classification of animals into reproductive states
//! - Guarded lifecycle transitions (insemination, pregnancy, revert, delete)
//! - One filtering/sorting/aggregation pipeline shared by every view and report
//! - Collaborator traits for the herd store and the prediction scorer
//! - File system utilities for reading/writing JSON

pub mod cli;
pub mod collab;
pub mod config;
pub mod domain;
pub mod errors;
pub mod export;
pub mod fs;
pub mod query;
pub mod schemas;
pub mod session;

// Re-export commonly used types
pub use errors::{HerdError, Result};
pub use schemas::{AnimalId, AnimalRecord, Biometrics, Config, ReproductiveStatus};
pub use session::HerdSession;
