//! File-backed herd store
//!
//! Keeps the herd in `.herdcycle/herd.json` and users in `users.json`.
//! Every mutation is a read-modify-write of the whole file under a lock.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{HerdError, Result};
use crate::fs;
use crate::schemas::{AnimalId, AnimalRecord, HerdFile, NewAnimal, User};

use super::HerdStore;

/// Herd store persisted as JSON under the herd root
#[derive(Debug)]
pub struct JsonHerdStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonHerdStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonHerdStore {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn modify<T>(&self, change: impl FnOnce(&mut HerdFile) -> Result<T>) -> Result<T> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut herd = fs::read_herd(&self.root)?;
        let result = change(&mut herd)?;
        fs::write_herd(&self.root, &herd)?;
        Ok(result)
    }
}

#[async_trait]
impl HerdStore for JsonHerdStore {
    async fn fetch_herd(&self) -> Result<Vec<AnimalRecord>> {
        let herd = fs::read_herd(&self.root)?;
        debug!(count = herd.animals.len(), "Loaded herd file");
        Ok(herd.animals)
    }

    async fn insert(&self, animal: NewAnimal) -> Result<AnimalRecord> {
        self.modify(|herd| {
            let record = AnimalRecord::new(AnimalId(herd.next_id), animal);
            herd.next_id += 1;
            herd.animals.push(record.clone());
            Ok(record)
        })
    }

    async fn update(&self, record: AnimalRecord) -> Result<AnimalRecord> {
        self.modify(|herd| {
            let slot = herd
                .animals
                .iter_mut()
                .find(|r| r.id == record.id)
                .ok_or_else(|| HerdError::NotFound(format!("animal {}", record.id)))?;
            *slot = record.clone();
            Ok(record)
        })
    }

    async fn delete(&self, id: AnimalId) -> Result<bool> {
        self.modify(|herd| {
            let before = herd.animals.len();
            herd.animals.retain(|r| r.id != id);
            Ok(herd.animals.len() != before)
        })
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(fs::read_users(&self.root)?.users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::get_herd_dir;
    use crate::query::test_support::record;
    use crate::schemas::ReproductiveStatus;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn setup() -> (TempDir, JsonHerdStore) {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(get_herd_dir(temp.path())).unwrap();
        let store = JsonHerdStore::new(temp.path());
        (temp, store)
    }

    fn new_animal(name: &str, score: f64) -> NewAnimal {
        let seed = record(1, name, score);
        NewAnimal {
            biometrics: seed.biometrics,
            score: seed.score,
            scored_at: seed.scored_at,
        }
    }

    #[tokio::test]
    async fn test_empty_store() {
        let (_temp, store) = setup();
        assert!(store.fetch_herd().await.unwrap().is_empty());
        assert!(store.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_keeps_ids_and_status() {
        let (_temp, store) = setup();
        let first = store.insert(new_animal("Luna", 85.0)).await.unwrap();
        let second = store.insert(new_animal("Bruma", 40.0)).await.unwrap();
        assert_eq!(first.id, AnimalId(1));
        assert_eq!(second.id, AnimalId(2));

        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let pregnant = first.with_status(ReproductiveStatus::Pregnant {
            inseminated_at: at,
            pregnant_at: at,
        });
        store.update(pregnant.clone()).await.unwrap();

        let reopened = JsonHerdStore::new(store.root());
        let herd = reopened.fetch_herd().await.unwrap();
        assert_eq!(herd.len(), 2);
        assert_eq!(herd[0], pregnant);
        assert_eq!(herd[1].id, AnimalId(2));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let (_temp, store) = setup();
        let first = store.insert(new_animal("Luna", 85.0)).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());
        assert!(!store.delete(first.id).await.unwrap());

        let next = store.insert(new_animal("Nieve", 60.0)).await.unwrap();
        assert_eq!(next.id, AnimalId(2));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_temp, store) = setup();
        let err = store.update(record(3, "Nube", 50.0)).await.unwrap_err();
        assert!(matches!(err, HerdError::NotFound(_)));
    }
}
