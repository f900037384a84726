use crate::models::{Connection, ConnectionStatus, UserProfile};
use crate::services::store::{ConnectionStore, ProfileStore, StoreError, StoreResult};
use std::path::Path;
use tokio::sync::RwLock;

/// In-process store backing both traits
///
/// Profiles keep insertion order, which is the scan order used for
/// tie-breaking. Connection uniqueness is checked and written under a
/// single write lock.
#[derive(Default)]
pub struct InMemoryStore {
    profiles: RwLock<Vec<UserProfile>>,
    connections: RwLock<Vec<Connection>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with profiles
    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
            connections: RwLock::new(Vec::new()),
        }
    }

    /// Load profiles from a JSON array file
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            StoreError::Unavailable(format!("{}: {}", path.as_ref().display(), e))
        })?;
        let profiles: Vec<UserProfile> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Unavailable(format!("Invalid seed file: {}", e)))?;

        tracing::info!("Seeded in-memory store with {} profiles", profiles.len());

        Ok(Self::with_profiles(profiles))
    }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn scan_eligible(&self, exclude_id: &str) -> StoreResult<Vec<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .iter()
            .filter(|p| p.id != exclude_id && p.is_eligible())
            .cloned()
            .collect())
    }

    async fn update(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        let mut profiles = self.profiles.write().await;
        let existing = profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| StoreError::NotFound(format!("User {}", profile.id)))?;

        *existing = profile.clone();
        Ok(profile.clone())
    }
}

#[async_trait::async_trait]
impl ConnectionStore for InMemoryStore {
    async fn find_by_pair(&self, a: &str, b: &str) -> StoreResult<Option<Connection>> {
        let connections = self.connections.read().await;
        Ok(connections.iter().find(|c| c.joins(a, b)).cloned())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Connection>> {
        let connections = self.connections.read().await;
        Ok(connections.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, connection: Connection) -> StoreResult<Connection> {
        let mut connections = self.connections.write().await;

        if connections
            .iter()
            .any(|c| c.joins(&connection.requester_id, &connection.receiver_id))
        {
            return Err(StoreError::Conflict(format!(
                "{} <-> {}",
                connection.requester_id, connection.receiver_id
            )));
        }

        connections.push(connection.clone());
        Ok(connection)
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        status: ConnectionStatus,
    ) -> StoreResult<Vec<Connection>> {
        let connections = self.connections.read().await;

        // Reverse insertion order first so equal timestamps still list newest first
        let mut found: Vec<Connection> = connections
            .iter()
            .rev()
            .filter(|c| c.involves(user_id) && c.status == status)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(found)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut connections = self.connections.write().await;
        let before = connections.len();
        connections.retain(|c| c.id != id);

        if connections.len() == before {
            return Err(StoreError::NotFound(format!("Connection {}", id)));
        }
        Ok(())
    }
}
