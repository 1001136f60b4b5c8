//! File system utilities for herdcycle
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_herd, read_json, read_users, write_herd, write_json};
pub use paths::{
    find_herd_root, get_config_path, get_exports_dir, get_herd_dir, get_herd_path,
    get_users_path, resolve_cwd, HERD_DIR_NAME,
};
