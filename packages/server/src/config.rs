//! Server configuration.

use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Runtime configuration of the echo server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Time to wait for in-flight closes after asking every client to close
    pub shutdown_grace: Duration,
}

impl ServerConfig {
    /// `host:port` string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}
