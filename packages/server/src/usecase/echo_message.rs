//! UseCase: エコー処理
//!
//! ### 何をテストしているか
//! - EchoMessageUseCase::execute() メソッド
//! - 受信したペイロードが同じ接続にそのまま返されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：テキスト・バイナリのエコー
//! - 異常系：未登録の接続、writer が閉じた接続

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, OutboundFrame, Payload, RepositoryError};

use super::error::EchoError;

/// エコーのユースケース
pub struct EchoMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl EchoMessageUseCase {
    /// 新しい EchoMessageUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// エコーを実行
    ///
    /// 受信したペイロードを送信元の接続の outbound チャンネルへそのまま積む。
    ///
    /// # Returns
    ///
    /// * `Ok(Payload)` - 返送したペイロード
    /// * `Err(EchoError)` - 返送できなかった
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        payload: Payload,
    ) -> Result<Payload, EchoError> {
        let handle = self
            .repository
            .get_handle(connection_id)
            .await
            .map_err(|_| EchoError::ConnectionNotFound(connection_id.to_string()))?;

        handle
            .send(OutboundFrame::Payload(payload.clone()))
            .map_err(|e| match e {
                RepositoryError::ChannelClosed(id) => EchoError::ChannelClosed(id),
                _ => EchoError::ConnectionNotFound(connection_id.to_string()),
            })?;

        Ok(payload)
    }
}
