//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{HerdError, Result};
use crate::schemas::{Config, HerdFile, UserDirectory};

use super::paths::{get_config_path, get_herd_path, get_users_path};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or violates the schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HerdError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            HerdError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        HerdError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| HerdError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file, or defaults if it doesn't exist.
pub fn read_config(root: &Path) -> Result<Config> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

/// Read herd.json, or an empty herd if it doesn't exist.
pub fn read_herd(root: &Path) -> Result<HerdFile> {
    let path = get_herd_path(root);
    if !path.exists() {
        return Ok(HerdFile::new());
    }
    read_json(&path)
}

/// Write herd.json.
pub fn write_herd(root: &Path, herd: &HerdFile) -> Result<()> {
    write_json(&get_herd_path(root), herd)
}

/// Read users.json, or an empty directory if it doesn't exist.
pub fn read_users(root: &Path) -> Result<UserDirectory> {
    let path = get_users_path(root);
    if !path.exists() {
        return Ok(UserDirectory::default());
    }
    read_json(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::paths::get_herd_dir;
    use tempfile::TempDir;

    fn setup_herd() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir(get_herd_dir(temp.path())).unwrap();
        temp
    }

    #[test]
    fn test_read_json_file_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.json");

        let result: Result<HerdFile> = read_json(&path);
        assert!(matches!(result.unwrap_err(), HerdError::FileNotFound(_)));
    }

    #[test]
    fn test_read_json_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invalid.json");
        fs::write(&path, "not valid json {").unwrap();

        let result: Result<HerdFile> = read_json(&path);
        assert!(matches!(result.unwrap_err(), HerdError::InvalidJson(_)));
    }

    #[test]
    fn test_read_json_rejects_illegal_lifecycle() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("herd.json");
        let content = r#"{
            "schema_version": 1,
            "next_id": 2,
            "animals": [{
                "id": 1, "name": "Brisa", "activity": 300, "temperature": 38.0,
                "days_postpartum": 40, "body_condition": 3.0, "breed": "HOL",
                "assisted_birth": false, "score": 80.0,
                "scored_at": "2024-01-01T00:00:00Z",
                "inseminated": false, "pregnant": true,
                "pregnant_at": "2024-02-01T00:00:00Z"
            }]
        }"#;
        fs::write(&path, content).unwrap();

        let err = read_json::<HerdFile>(&path).unwrap_err();
        assert!(matches!(err, HerdError::InvalidJson(_)));
        assert!(err.to_string().contains("must be inseminated"));
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("herd.json");

        write_json(&path, &HerdFile::new()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_read_config_default_when_missing() {
        let temp = setup_herd();
        let config = read_config(temp.path()).unwrap();
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_read_herd_empty_when_missing() {
        let temp = setup_herd();
        let herd = read_herd(temp.path()).unwrap();
        assert!(herd.animals.is_empty());
        assert_eq!(herd.next_id, 1);
    }

    #[test]
    fn test_write_and_read_herd() {
        let temp = setup_herd();
        let mut herd = HerdFile::new();
        herd.next_id = 9;

        write_herd(temp.path(), &herd).unwrap();
        let read = read_herd(temp.path()).unwrap();
        assert_eq!(read.next_id, 9);
    }

    #[test]
    fn test_read_users() {
        let temp = setup_herd();
        fs::write(
            get_users_path(temp.path()),
            r#"{"users": [{"id": 1, "username": "admin", "role": "admin"}]}"#,
        )
        .unwrap();

        let users = read_users(temp.path()).unwrap();
        assert_eq!(users.users.len(), 1);
        assert_eq!(users.users[0].username, "admin");
    }
}
