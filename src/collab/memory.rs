//! In-memory herd store

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::errors::{HerdError, Result};
use crate::schemas::{AnimalId, AnimalRecord, NewAnimal, User};

use super::HerdStore;

#[derive(Debug)]
struct MemoryState {
    next_id: u64,
    animals: Vec<AnimalRecord>,
    users: Vec<User>,
}

/// Herd store backed by a `Vec` kept in insertion order.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            state: Mutex::new(MemoryState {
                next_id: 1,
                animals: Vec::new(),
                users: Vec::new(),
            }),
        }
    }

    /// Seed the store with existing records; new ids continue after the highest
    pub fn with_records(records: Vec<AnimalRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
        MemoryStore {
            state: Mutex::new(MemoryState {
                next_id,
                animals: records,
                users: Vec::new(),
            }),
        }
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.lock().users = users;
        self
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl HerdStore for MemoryStore {
    async fn fetch_herd(&self) -> Result<Vec<AnimalRecord>> {
        Ok(self.lock().animals.clone())
    }

    async fn insert(&self, animal: NewAnimal) -> Result<AnimalRecord> {
        let mut state = self.lock();
        let record = AnimalRecord::new(AnimalId(state.next_id), animal);
        state.next_id += 1;
        state.animals.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: AnimalRecord) -> Result<AnimalRecord> {
        let mut state = self.lock();
        let slot = state
            .animals
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| HerdError::NotFound(format!("animal {}", record.id)))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: AnimalId) -> Result<bool> {
        let mut state = self.lock();
        let before = state.animals.len();
        state.animals.retain(|r| r.id != id);
        Ok(state.animals.len() != before)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.lock().users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::record;
    use crate::schemas::ReproductiveStatus;
    use chrono::Utc;

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = MemoryStore::with_records(vec![record(4, "Luna", 40.0)]);
        let seed = record(1, "Bruma", 72.5);

        let inserted = store
            .insert(NewAnimal {
                biometrics: seed.biometrics.clone(),
                score: seed.score,
                scored_at: seed.scored_at,
            })
            .await
            .unwrap();

        assert_eq!(inserted.id, AnimalId(5));
        assert_eq!(inserted.status, ReproductiveStatus::NotInseminated);
        let names: Vec<String> = store
            .fetch_herd()
            .await
            .unwrap()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["Luna", "Bruma"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.update(record(9, "Nieve", 80.0)).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_replaces_by_id() {
        let store = MemoryStore::with_records(vec![record(1, "Luna", 85.0)]);
        let updated = record(1, "Luna", 85.0).with_status(ReproductiveStatus::Inseminated {
            inseminated_at: Utc::now(),
        });

        store.update(updated).await.unwrap();
        assert!(store.fetch_herd().await.unwrap()[0].inseminated());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::with_records(vec![record(1, "Luna", 40.0)]);
        assert!(store.delete(AnimalId(1)).await.unwrap());
        assert!(!store.delete(AnimalId(1)).await.unwrap());
        assert!(store.fetch_herd().await.unwrap().is_empty());
    }
}
