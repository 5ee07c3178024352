//! Server state.

use std::sync::Arc;

use wsecho_shared::Lifecycle;

use crate::domain::ConnectionRepository;

/// Shared application state
pub struct AppState {
    /// Repository（接続集合の抽象化）
    pub repository: Arc<dyn ConnectionRepository>,
    /// Process lifecycle, used to refuse upgrades once shutdown has begun
    pub lifecycle: Lifecycle,
}
