//! UseCase: 接続解除処理
//!
//! ### 何をテストしているか
//! - UnregisterConnectionUseCase::execute() メソッド
//! - 切断した接続が集合から削除され、残りの接続数が返されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続の削除
//! - エッジケース：最後の接続の削除
//! - 異常系：存在しない接続の削除

use std::sync::Arc;

use crate::domain::{Connection, ConnectionId, ConnectionRepository};

use super::error::DisconnectError;

/// 解除結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisteredConnection {
    /// 閉じられた接続
    pub connection: Connection,
    /// 残りの接続数
    pub remaining: usize,
}

/// 接続解除のユースケース
pub struct UnregisterConnectionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl UnregisterConnectionUseCase {
    /// 新しい UnregisterConnectionUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// 接続解除を実行
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<UnregisteredConnection, DisconnectError> {
        let (connection, remaining) = self
            .repository
            .remove(connection_id)
            .await
            .map_err(|_| DisconnectError::ConnectionNotFound(connection_id.to_string()))?;

        Ok(UnregisteredConnection {
            connection,
            remaining,
        })
    }
}
