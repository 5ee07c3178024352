//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::RepositoryError;

/// 接続登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

/// エコー処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EchoError {
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("Connection '{0}' can no longer accept outbound frames")]
    ChannelClosed(String),
}

/// 接続解除のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),
}
