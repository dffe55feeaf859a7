//! Storage Adapters
//!
//! The storage engine sits behind two narrow traits so the services never
//! see a concrete backend. [`postgres`] is the production adapter operating
//! on the partition tables picked at startup; [`memory`] is a lightweight
//! adapter with the same semantics, used by the test suites and for
//! embedding the service without a database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Candidate, IdentityRecord};
use crate::query::FilterSpec;
use crate::utils::error::AppError;

pub use memory::{MemoryCandidateStore, MemoryIdentityStore};
pub use postgres::{PgCandidateStore, PgIdentityStore};

/// Errors surfaced by storage adapters
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique-key constraint rejected the write
    #[error("duplicate unique key")]
    Duplicate,

    /// Database driver failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other backend failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => AppError::Conflict("Resource must be unique".to_string()),
            StoreError::Database(e) => AppError::Database(e),
            StoreError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Identity lookups and uniqueness-enforcing inserts against the active
/// partition
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Look up an identity by its (normalized) email address
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<IdentityRecord>>;

    /// Insert a new identity; `StoreError::Duplicate` on a taken email
    async fn insert(&self, record: &IdentityRecord) -> StoreResult<()>;
}

/// Candidate persistence against the active partition
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Insert a new candidate; `StoreError::Duplicate` on a taken email
    async fn insert(&self, candidate: &Candidate) -> StoreResult<()>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Candidate>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Candidate>>;

    /// Atomically replace every field except the identifier, returning the
    /// post-update record, or `None` when the id does not exist
    async fn replace(&self, candidate: &Candidate) -> StoreResult<Option<Candidate>>;

    /// Remove a candidate; `false` when the id does not exist
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// All candidates matching the filter, in natural storage order
    async fn search(&self, filter: &FilterSpec) -> StoreResult<Vec<Candidate>>;

    /// A window of candidates in storage order, for the report export
    async fn window(&self, offset: i64, limit: i64) -> StoreResult<Vec<Candidate>>;
}
