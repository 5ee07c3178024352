//! Repository trait for the connection set.
//!
//! The use-case layer depends on this trait, not on a concrete storage.

use async_trait::async_trait;

use super::{
    entity::{Connection, ConnectionHandle},
    error::RepositoryError,
    value_object::ConnectionId,
};

/// Storage of the currently open connections.
///
/// A connection is a member iff it has not yet signaled closure.
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Add a connection. Returns the number of active connections afterwards.
    async fn add(&self, handle: ConnectionHandle) -> Result<usize, RepositoryError>;

    /// Remove a connection. Returns the closed connection and the number of
    /// active connections afterwards.
    async fn remove(&self, id: &ConnectionId) -> Result<(Connection, usize), RepositoryError>;

    /// Get a clone of the handle for a connection
    async fn get_handle(&self, id: &ConnectionId) -> Result<ConnectionHandle, RepositoryError>;

    /// Handles of every active connection
    async fn get_all_handles(&self) -> Vec<ConnectionHandle>;

    /// Active connections
    async fn get_connections(&self) -> Vec<Connection>;

    /// Number of active connections
    async fn count(&self) -> usize;
}
