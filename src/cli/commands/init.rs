//! Init command - Initialize a new herd

use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::fs::{
    get_config_path, get_exports_dir, get_herd_dir, get_herd_path, get_users_path, resolve_cwd,
    write_json,
};
use crate::schemas::{Config, HerdFile, UserDirectory};

/// Initialize a herd in the specified directory.
///
/// Existing herd and user files are never overwritten; `force` only
/// rewrites config.json with defaults.
pub async fn run(cwd: Option<&Path>, force: bool, dry_run: bool) -> Result<()> {
    let root = resolve_cwd(cwd);
    let herd_dir = get_herd_dir(&root);
    let config = Config::default();

    let mut planned = Vec::new();
    let config_path = get_config_path(&root);
    if force || !config_path.exists() {
        planned.push(config_path);
    }
    for path in [get_herd_path(&root), get_users_path(&root)] {
        if !path.exists() {
            planned.push(path);
        }
    }

    if planned.is_empty() {
        println!("Herd already initialized at {}", herd_dir.display());
        return Ok(());
    }

    if dry_run {
        for path in &planned {
            println!("[DRY RUN] Would write {}", path.display());
        }
        return Ok(());
    }

    for path in &planned {
        if path.ends_with("config.json") {
            write_json(path, &config)?;
        } else if path.ends_with("herd.json") {
            write_json(path, &HerdFile::new())?;
        } else {
            write_json(path, &UserDirectory::default())?;
        }
    }
    std::fs::create_dir_all(get_exports_dir(&root, &config.export_dir))?;

    info!(path = %herd_dir.display(), "Initialized herd");
    println!("Initialized herd at {}", herd_dir.display());
    Ok(())
}
