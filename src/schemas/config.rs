//! Config schema - Configuration for herdcycle

use serde::{Deserialize, Serialize};

/// How prediction scores are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScorerMode {
    /// Spawn the configured scoring command
    #[default]
    Process,
    /// Return `fixed_score` for every request (demos and offline use)
    Fixed,
}

/// Scorer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Scorer mode
    #[serde(default)]
    pub mode: ScorerMode,

    /// Command to execute (e.g., "python3")
    #[serde(default = "default_scorer_command")]
    pub command: String,

    /// Arguments to pass to the command
    #[serde(default = "default_scorer_args")]
    pub args: Vec<String>,

    /// Score returned in fixed mode
    #[serde(default = "default_fixed_score")]
    pub fixed_score: f64,
}

fn default_scorer_command() -> String {
    "python3".to_string()
}

fn default_scorer_args() -> Vec<String> {
    vec!["predict.py".to_string()]
}

fn default_fixed_score() -> f64 {
    50.0
}

impl Default for ScorerConfig {
    fn default() -> Self {
        ScorerConfig {
            mode: ScorerMode::Process,
            command: default_scorer_command(),
            args: default_scorer_args(),
            fixed_score: default_fixed_score(),
        }
    }
}

/// Main configuration for herdcycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Scorer configuration
    #[serde(default)]
    pub scorer: ScorerConfig,

    /// Timeout in seconds for a scorer call
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,

    /// Directory (relative to .herdcycle) where reports are written
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// Username recorded as the acting user when none is given
    #[serde(default)]
    pub default_user: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_timeout_seconds() -> u32 {
    30
}

fn default_export_dir() -> String {
    "exports".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            scorer: ScorerConfig::default(),
            timeout_seconds: 30,
            export_dir: default_export_dir(),
            default_user: None,
        }
    }
}
