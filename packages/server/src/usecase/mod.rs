//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod drain_connections;
pub mod echo_message;
pub mod error;
pub mod register_connection;
pub mod unregister_connection;

pub use drain_connections::DrainConnectionsUseCase;
pub use echo_message::EchoMessageUseCase;
pub use error::{ConnectError, DisconnectError, EchoError};
pub use register_connection::{RegisterConnectionUseCase, RegisteredConnection};
pub use unregister_connection::{UnregisterConnectionUseCase, UnregisteredConnection};
