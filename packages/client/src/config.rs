//! Client configuration.

use std::time::Duration;

use tokio_tungstenite::tungstenite::client::IntoClientRequest;

use crate::error::ClientError;

pub const DEFAULT_URL: &str = "ws://127.0.0.1:8080";
pub const DEFAULT_GREETING: &str = "Hello from Rust client!";
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 3;
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Runtime configuration of the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server URL (`ws://` or `wss://`)
    pub url: String,
    /// Payload sent once on every successful connection
    pub greeting: String,
    pub max_reconnect_attempts: u32,
    /// Fixed delay before each reconnect attempt
    pub reconnect_delay: Duration,
    /// Upper bound on a single connection attempt
    pub connect_timeout: Duration,
    /// Time allowed for the close handshake during shutdown
    pub shutdown_grace: Duration,
}

impl ClientConfig {
    /// Create a configuration for `url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if `url` is not a `ws://` or
    /// `wss://` URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ClientError> {
        let url = url.into();
        validate_url(&url)?;
        Ok(Self {
            url,
            greeting: DEFAULT_GREETING.to_string(),
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        })
    }
}

fn validate_url(url: &str) -> Result<(), ClientError> {
    let request = url
        .into_client_request()
        .map_err(|e| ClientError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    match request.uri().scheme_str() {
        Some("ws") | Some("wss") => Ok(()),
        other => Err(ClientError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {:?}", other.unwrap_or("")),
        }),
    }
}
