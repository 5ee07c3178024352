//! InMemory Connection Repository 実装
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! HashMap をインメモリの接続集合として使用します。
//!
//! 接続ごとに tokio タスクが動くため、集合は Mutex で保護します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionHandle, ConnectionId, ConnectionRepository, RepositoryError,
};

/// インメモリ Connection Repository 実装
#[derive(Default)]
pub struct InMemoryConnectionRepository {
    /// 接続中のコネクション（outbound sender を含む）
    connections: Mutex<HashMap<ConnectionId, ConnectionHandle>>,
}

impl InMemoryConnectionRepository {
    /// 新しい InMemoryConnectionRepository を作成
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn add(&self, handle: ConnectionHandle) -> Result<usize, RepositoryError> {
        let mut connections = self.connections.lock().await;
        let id = handle.id();
        if connections.contains_key(&id) {
            return Err(RepositoryError::DuplicateConnection(id.to_string()));
        }
        connections.insert(id, handle);
        Ok(connections.len())
    }

    async fn remove(&self, id: &ConnectionId) -> Result<(Connection, usize), RepositoryError> {
        let mut connections = self.connections.lock().await;
        let handle = connections
            .remove(id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(id.to_string()))?;

        let mut connection = handle.connection;
        connection.close();
        Ok((connection, connections.len()))
    }

    async fn get_handle(&self, id: &ConnectionId) -> Result<ConnectionHandle, RepositoryError> {
        let connections = self.connections.lock().await;
        connections
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::ConnectionNotFound(id.to_string()))
    }

    async fn get_all_handles(&self) -> Vec<ConnectionHandle> {
        let connections = self.connections.lock().await;
        connections.values().cloned().collect()
    }

    async fn get_connections(&self) -> Vec<Connection> {
        let connections = self.connections.lock().await;
        let mut list: Vec<Connection> = connections
            .values()
            .map(|handle| handle.connection.clone())
            .collect();

        // Sort by connected_at for consistent ordering
        list.sort_by_key(|c| (c.connected_at, *c.id.as_uuid()));
        list
    }

    async fn count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
