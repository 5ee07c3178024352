//! UseCase: 接続登録処理
//!
//! ### 何をテストしているか
//! - RegisterConnectionUseCase::execute() メソッド
//! - 新しい接続が接続集合に追加され、接続数が返されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - 正常系：複数接続での接続数の増加

use std::{net::SocketAddr, sync::Arc};

use tokio::sync::mpsc::UnboundedSender;
use wsecho_shared::time::current_timestamp_millis;

use crate::domain::{
    Connection, ConnectionHandle, ConnectionId, ConnectionIdFactory, ConnectionRepository,
    OutboundFrame, RepositoryError, Timestamp,
};

use super::error::ConnectError;

/// 登録結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredConnection {
    /// 採番された接続 ID
    pub id: ConnectionId,
    /// 登録後の接続数
    pub active: usize,
}

/// 接続登録のユースケース
pub struct RegisterConnectionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl RegisterConnectionUseCase {
    /// 新しい RegisterConnectionUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// 接続登録を実行
    ///
    /// # Arguments
    ///
    /// * `peer_addr` - 接続元アドレス
    /// * `sender` - この接続の writer タスクへの送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(RegisteredConnection)` - 登録成功
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(
        &self,
        peer_addr: SocketAddr,
        sender: UnboundedSender<OutboundFrame>,
    ) -> Result<RegisteredConnection, ConnectError> {
        let id = ConnectionIdFactory::generate();
        let connected_at = Timestamp::new(current_timestamp_millis());
        let connection = Connection::new(id, peer_addr, connected_at);

        let active = self
            .repository
            .add(ConnectionHandle::new(connection, sender))
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateConnection(id) => ConnectError::DuplicateConnection(id),
                other => ConnectError::Repository(other),
            })?;

        Ok(RegisteredConnection { id, active })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryConnectionRepository;
    use tokio::sync::mpsc;

    fn create_test_repository() -> Arc<InMemoryConnectionRepository> {
        Arc::new(InMemoryConnectionRepository::new())
    }

    fn peer(port: u16) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    #[tokio::test]
    async fn test_register_connection_success() {
        // テスト項目: 新規接続が正常に登録できる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = RegisterConnectionUseCase::new(repository.clone());
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(peer(50001), tx).await;

        // then (期待する結果):
        let registered = result.unwrap();
        assert_eq!(registered.active, 1);

        let handle = repository.get_handle(&registered.id).await.unwrap();
        assert_eq!(handle.connection.peer_addr, peer(50001));
        assert!(handle.connection.is_open());
    }

    #[tokio::test]
    async fn test_register_multiple_connections_increments_count() {
        // テスト項目: 接続するたびに接続数が 1 ずつ増える
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = RegisterConnectionUseCase::new(repository.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();

        // when (操作):
        let first = usecase.execute(peer(50001), tx1).await.unwrap();
        let second = usecase.execute(peer(50002), tx2).await.unwrap();
        let third = usecase.execute(peer(50003), tx3).await.unwrap();

        // then (期待する結果):
        assert_eq!(first.active, 1);
        assert_eq!(second.active, 2);
        assert_eq!(third.active, 3);
        assert_ne!(first.id, second.id);
        assert_eq!(repository.count().await, 3);
    }
}
