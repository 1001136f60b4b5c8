//! CLI command implementations

pub mod export;
pub mod init;
pub mod list;
pub mod predict;
pub mod show;
pub mod summary;
pub mod transition;

use std::path::{Path, PathBuf};

use crate::collab::{build_scorer, JsonHerdStore};
use crate::config::load_config;
use crate::errors::{HerdError, Result};
use crate::fs::{find_herd_root, resolve_cwd};
use crate::schemas::Config;
use crate::session::HerdSession;

/// An opened herd: its root, configuration and a loaded session
pub struct HerdContext {
    pub root: PathBuf,
    pub config: Config,
    pub session: HerdSession,
}

/// Locate the herd from `cwd`, load its config and fetch the herd.
///
/// The acting user is `user` when given, else the configured default.
pub async fn open_herd(cwd: Option<&Path>, user: Option<&str>) -> Result<HerdContext> {
    let root = find_herd_root(&resolve_cwd(cwd))?;
    let config = load_config(&root)?;
    let user = user
        .map(str::to_string)
        .or_else(|| config.default_user.clone());

    let session = HerdSession::new(
        Box::new(JsonHerdStore::new(&root)),
        build_scorer(&config, &root),
    )
    .with_user(user);
    session.load().await?;

    Ok(HerdContext {
        root,
        config,
        session,
    })
}

/// Map a `FromStr` failure on a CLI argument to a validation error
pub(crate) fn parse_arg<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    value.parse::<T>().map_err(HerdError::Validation)
}

/// Print a value as pretty JSON
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| HerdError::InvalidJson(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
