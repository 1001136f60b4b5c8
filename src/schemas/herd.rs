//! Herd file schema - On-disk snapshot of the herd

use serde::{Deserialize, Serialize};

use super::{AnimalRecord, User};

/// Contents of herd.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerdFile {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Next id the store will assign
    pub next_id: u64,

    /// Animals in insertion order
    pub animals: Vec<AnimalRecord>,
}

impl HerdFile {
    /// Create a new empty herd
    pub fn new() -> Self {
        HerdFile {
            schema_version: 1,
            next_id: 1,
            animals: Vec::new(),
        }
    }
}

impl Default for HerdFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Contents of users.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDirectory {
    #[serde(default)]
    pub users: Vec<User>,
}
