use crate::services::StoreError;
use thiserror::Error;

/// Failures signaled by the connection and matching operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("User not found: {0}")]
    ProfileNotFound(String),

    #[error("Cannot connect to yourself")]
    SelfConnection,

    #[error("Connection already exists")]
    AlreadyConnected,

    #[error("Connection not found or unauthorized")]
    NotFoundOrUnauthorized,

    /// Opaque infrastructure failure, detail is for logs only
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::StoreUnavailable(err)
    }
}
