//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{HerdError, Result};
use crate::fs;
use crate::schemas::{Config, ScorerMode, MAX_SCORE};

/// Load configuration for the herd, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults.
/// If it doesn't exist, default configuration is returned.
///
/// # Errors
/// * `ConfigError` - If a value is present but unusable
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root)?;
    check_config(&config)?;
    Ok(config)
}

fn check_config(config: &Config) -> Result<()> {
    if config.timeout_seconds == 0 {
        return Err(HerdError::ConfigError(
            "timeout_seconds must be greater than 0".to_string(),
        ));
    }
    if config.export_dir.trim().is_empty() {
        return Err(HerdError::ConfigError("export_dir must not be empty".to_string()));
    }
    match config.scorer.mode {
        ScorerMode::Process if config.scorer.command.trim().is_empty() => Err(
            HerdError::ConfigError("scorer.command is required in process mode".to_string()),
        ),
        ScorerMode::Fixed
            if !(0.0..=MAX_SCORE).contains(&config.scorer.fixed_score) =>
        {
            Err(HerdError::ConfigError(format!(
                "scorer.fixed_score {} is outside [0, {}]",
                config.scorer.fixed_score, MAX_SCORE
            )))
        }
        _ => Ok(()),
    }
}
