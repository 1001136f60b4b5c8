//! Path resolution utilities for herdcycle
//!
//! Provides functions to locate the herd root and construct paths
//! to the herd's data files.

use std::path::{Path, PathBuf};

use crate::errors::{HerdError, Result};

/// Name of the data directory marking a herd root
pub const HERD_DIR_NAME: &str = ".herdcycle";

/// Find the herd root: the nearest ancestor containing `.herdcycle`.
///
/// # Arguments
/// * `start_cwd` - The directory to start searching from
///
/// # Errors
/// * `HerdNotFound` - If no ancestor contains a `.herdcycle` directory
pub fn find_herd_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| HerdError::HerdNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(HERD_DIR_NAME).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(HerdError::HerdNotFound(
                    "Could not find a .herdcycle directory; run `herdcycle init` first".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .herdcycle directory.
pub fn get_herd_dir(root: &Path) -> PathBuf {
    root.join(HERD_DIR_NAME)
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_herd_dir(root).join("config.json")
}

/// Get the path to the herd.json file.
pub fn get_herd_path(root: &Path) -> PathBuf {
    get_herd_dir(root).join("herd.json")
}

/// Get the path to the users.json file.
pub fn get_users_path(root: &Path) -> PathBuf {
    get_herd_dir(root).join("users.json")
}

/// Get the path to the export directory.
pub fn get_exports_dir(root: &Path, export_dir: &str) -> PathBuf {
    get_herd_dir(root).join(export_dir)
}
