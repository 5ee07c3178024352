//! Client error types.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Connection(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Connection timeout after {0:?}")]
    ConnectTimeout(Duration),

    #[error("Max reconnection attempts reached ({0})")]
    RetriesExhausted(u32),
}
