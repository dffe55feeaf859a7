//! In-Memory Storage Adapter
//!
//! Backend-free implementation of the store traits with the same observable
//! semantics as the Postgres adapter, including unique-email enforcement
//! and insertion-order windows. Used heavily by the test suites.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Candidate, IdentityRecord};
use crate::query::FilterSpec;

use super::{CandidateStore, IdentityStore, StoreError, StoreResult};

fn lock<T>(mutex: &Mutex<T>) -> StoreResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
}

/// In-memory identity partition
#[derive(Default)]
pub struct MemoryIdentityStore {
    records: Mutex<Vec<IdentityRecord>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove an identity, simulating out-of-band revocation
    pub fn remove(&self, email: &str) -> StoreResult<bool> {
        let mut records = lock(&self.records)?;
        let before = records.len();
        records.retain(|r| r.email != email);
        Ok(records.len() < before)
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<IdentityRecord>> {
        let records = lock(&self.records)?;
        Ok(records.iter().find(|r| r.email == email).cloned())
    }

    async fn insert(&self, record: &IdentityRecord) -> StoreResult<()> {
        let mut records = lock(&self.records)?;
        if records.iter().any(|r| r.email == record.email) {
            return Err(StoreError::Duplicate);
        }
        records.push(record.clone());
        Ok(())
    }
}

/// In-memory candidate partition, kept in insertion order
#[derive(Default)]
pub struct MemoryCandidateStore {
    records: Mutex<Vec<Candidate>>,
}

impl MemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn insert(&self, candidate: &Candidate) -> StoreResult<()> {
        let mut records = lock(&self.records)?;
        if records.iter().any(|c| c.email == candidate.email) {
            return Err(StoreError::Duplicate);
        }
        records.push(candidate.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Candidate>> {
        let records = lock(&self.records)?;
        Ok(records.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Candidate>> {
        let records = lock(&self.records)?;
        Ok(records.iter().find(|c| c.email == email).cloned())
    }

    async fn replace(&self, candidate: &Candidate) -> StoreResult<Option<Candidate>> {
        let mut records = lock(&self.records)?;
        match records.iter_mut().find(|c| c.id == candidate.id) {
            Some(existing) => {
                *existing = candidate.clone();
                Ok(Some(candidate.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut records = lock(&self.records)?;
        let before = records.len();
        records.retain(|c| c.id != id);
        Ok(records.len() < before)
    }

    async fn search(&self, filter: &FilterSpec) -> StoreResult<Vec<Candidate>> {
        let records = lock(&self.records)?;
        Ok(records.iter().filter(|c| filter.matches(c)).cloned().collect())
    }

    async fn window(&self, offset: i64, limit: i64) -> StoreResult<Vec<Candidate>> {
        let records = lock(&self.records)?;
        Ok(records
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn candidate(email: &str) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            last_name: "Candidate".to_string(),
            email: email.to_string(),
            career_level: "Junior".to_string(),
            job_major: "Engineering".to_string(),
            years_of_experience: 1,
            degree_type: "Bachelor".to_string(),
            skills: vec!["Rust".to_string()],
            nationality: "JO".to_string(),
            city: "Amman".to_string(),
            salary: 50_000.0,
            gender: Gender::NotSpecified,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryCandidateStore::new();
        store.insert(&candidate("a@example.com")).await.unwrap();

        let result = store.insert(&candidate("a@example.com")).await;
        assert!(matches!(result, Err(StoreError::Duplicate)));
    }

    #[tokio::test]
    async fn test_replace_missing_returns_none() {
        let store = MemoryCandidateStore::new();
        let unknown = candidate("b@example.com");
        assert!(store.replace(&unknown).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_absence() {
        let store = MemoryCandidateStore::new();
        let c = candidate("c@example.com");
        store.insert(&c).await.unwrap();

        assert!(store.delete(c.id).await.unwrap());
        assert!(!store.delete(c.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_window_preserves_insertion_order() {
        let store = MemoryCandidateStore::new();
        for i in 0..5 {
            store
                .insert(&candidate(&format!("w{}@example.com", i)))
                .await
                .unwrap();
        }

        let window = store.window(2, 2).await.unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].email, "w2@example.com");
        assert_eq!(window[1].email, "w3@example.com");
    }

    #[tokio::test]
    async fn test_identity_remove() {
        let store = MemoryIdentityStore::new();
        let record = IdentityRecord {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            secret_hash: "hash".to_string(),
        };
        store.insert(&record).await.unwrap();

        assert!(store.remove("jane@example.com").unwrap());
        assert!(store.find_by_email("jane@example.com").await.unwrap().is_none());
    }
}
