//! Reconnecting WebSocket client.
//!
//! Connects to an echo server, sends one greeting, logs everything it
//! receives and recovers from connection loss with a bounded number of
//! fixed-delay reconnect attempts.

pub mod client;
pub mod config;
pub mod connector;
pub mod error;
pub mod event;
pub mod reconnect;

// Re-export entry points
pub use client::WebSocketClient;
pub use config::ClientConfig;
pub use connector::{Connector, TungsteniteConnector, WsStream};
pub use error::ClientError;
pub use reconnect::{ReconnectDecision, ReconnectState};
