//! UseCase: シャットダウン時の接続ドレイン
//!
//! ### 何をテストしているか
//! - DrainConnectionsUseCase::execute() メソッド
//! - 全ての接続に Close が要求され、猶予時間だけ待機すること
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数接続のドレイン
//! - エッジケース：接続 0 件、writer が既に閉じている接続

use std::{sync::Arc, time::Duration};

use tracing::{info, warn};

use crate::domain::{ConnectionRepository, OutboundFrame};

/// 接続ドレインのユースケース
pub struct DrainConnectionsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl DrainConnectionsUseCase {
    /// 新しい DrainConnectionsUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// 全ての接続に Close を要求し、`grace` だけ待機する
    ///
    /// 接続は各接続の close ハンドラが集合から削除する。ここでは削除しない。
    ///
    /// # Returns
    ///
    /// Close を要求できた接続の数
    pub async fn execute(&self, grace: Duration) -> usize {
        let handles = self.repository.get_all_handles().await;
        info!("Closing {} active connection(s)...", handles.len());

        let mut requested = 0;
        for handle in handles {
            match handle.send(OutboundFrame::Close) {
                Ok(()) => requested += 1,
                Err(e) => warn!("Failed to request close: {}", e),
            }
        }

        tokio::time::sleep(grace).await;
        requested
    }
}
