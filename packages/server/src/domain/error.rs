//! Domain layer error definitions.

use thiserror::Error;

/// Errors raised by connection repositories
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("Outbound channel of connection '{0}' is closed")]
    ChannelClosed(String),
}
