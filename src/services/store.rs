//! Storage traits consumed by the matching and connection logic.
//!
//! Both traits are object safe so handlers can hold `Arc<dyn ...>` and swap
//! the PostgreSQL backend for the in-memory one.

use crate::models::{Connection, ConnectionStatus, UserProfile};
use thiserror::Error;

/// Errors surfaced by a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness guard rejected the write
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read and update access to user profiles
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Looks up a profile, `Ok(None)` when it does not exist
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>>;

    /// Every eligible profile except `exclude_id`, in a stable scan order
    async fn scan_eligible(&self, exclude_id: &str) -> StoreResult<Vec<UserProfile>>;

    /// Replaces the stored profile with the same id.
    ///
    /// Returns `StoreError::NotFound` when no such profile exists.
    async fn update(&self, profile: &UserProfile) -> StoreResult<UserProfile>;

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(true)
    }
}

/// Persistence for symmetric connections
///
/// Implementations must reject a second record for the same unordered pair
/// atomically; callers' own existence checks are advisory only.
#[async_trait::async_trait]
pub trait ConnectionStore: Send + Sync {
    /// Connection joining `a` and `b` in either direction
    async fn find_by_pair(&self, a: &str, b: &str) -> StoreResult<Option<Connection>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Connection>>;

    /// Persists a new record, `StoreError::Conflict` if the pair is taken
    async fn create(&self, connection: Connection) -> StoreResult<Connection>;

    /// Connections where the user is either side, newest first
    async fn list_for_user(
        &self,
        user_id: &str,
        status: ConnectionStatus,
    ) -> StoreResult<Vec<Connection>>;

    /// Hard delete, `StoreError::NotFound` if the id is unknown
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
