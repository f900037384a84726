use crate::core::error::CoreError;
use crate::models::{Connection, ConnectionDetails, ConnectionStatus, ConnectionView, UserProfile};
use crate::services::{ConnectionStore, ProfileStore, StoreError};
use std::sync::Arc;

/// Connection lifecycle manager
///
/// Holds only store handles; every call is request scoped. The pair check
/// in `connect` is advisory, the connection store guards uniqueness.
#[derive(Clone)]
pub struct ConnectionManager {
    profiles: Arc<dyn ProfileStore>,
    connections: Arc<dyn ConnectionStore>,
}

impl ConnectionManager {
    pub fn new(profiles: Arc<dyn ProfileStore>, connections: Arc<dyn ConnectionStore>) -> Self {
        Self {
            profiles,
            connections,
        }
    }

    /// Connect `user_a` (requester) with `user_b` (receiver)
    ///
    /// Connections are accepted on creation; there is no request/approve
    /// step yet.
    pub async fn connect(&self, user_a: &str, user_b: &str) -> Result<ConnectionDetails, CoreError> {
        if user_a == user_b {
            return Err(CoreError::SelfConnection);
        }

        let requester = self.require_profile(user_a).await?;
        let receiver = self.require_profile(user_b).await?;

        if self.connections.find_by_pair(user_a, user_b).await?.is_some() {
            return Err(CoreError::AlreadyConnected);
        }

        let created = match self.connections.create(Connection::accepted(user_a, user_b)).await {
            Ok(connection) => connection,
            Err(StoreError::Conflict(_)) => return Err(CoreError::AlreadyConnected),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            "Connected {} -> {} ({})",
            created.requester_id,
            created.receiver_id,
            created.id
        );

        Ok(ConnectionDetails {
            id: created.id,
            requester_id: created.requester_id,
            receiver_id: created.receiver_id,
            status: created.status,
            created_at: created.created_at,
            requester: requester.summary(),
            receiver: receiver.summary(),
        })
    }

    /// Accepted connections of `user_id`, newest first, each resolved to
    /// the other participant
    pub async fn list_connections(&self, user_id: &str) -> Result<Vec<ConnectionView>, CoreError> {
        let connections = self
            .connections
            .list_for_user(user_id, ConnectionStatus::Accepted)
            .await?;

        let mut views = Vec::with_capacity(connections.len());
        for connection in connections {
            let other_id = connection.other_party(user_id);

            match self.profiles.get_by_id(other_id).await? {
                Some(other) => views.push(ConnectionView {
                    id: connection.id,
                    user: other.summary(),
                    connected_since: connection.created_at,
                    status: connection.status,
                }),
                None => {
                    tracing::warn!(
                        "Connection {} references missing profile {}, skipping",
                        connection.id,
                        other_id
                    );
                }
            }
        }

        Ok(views)
    }

    /// Remove a connection `user_id` takes part in
    pub async fn disconnect(&self, connection_id: &str, user_id: &str) -> Result<(), CoreError> {
        let connection = self
            .connections
            .find_by_id(connection_id)
            .await?
            .filter(|c| c.involves(user_id))
            .ok_or(CoreError::NotFoundOrUnauthorized)?;

        match self.connections.delete(&connection.id).await {
            Ok(()) => {
                tracing::info!("User {} removed connection {}", user_id, connection.id);
                Ok(())
            }
            // Removed concurrently by the other participant
            Err(StoreError::NotFound(_)) => Err(CoreError::NotFoundOrUnauthorized),
            Err(e) => Err(e.into()),
        }
    }

    async fn require_profile(&self, id: &str) -> Result<UserProfile, CoreError> {
        self.profiles
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ProfileNotFound(id.to_string()))
    }
}
