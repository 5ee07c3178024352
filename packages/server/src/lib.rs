//! WebSocket echo server library.
//!
//! Accepts WebSocket connections, echoes every payload back to its sender,
//! tracks the set of open connections and closes all of them on shutdown.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
pub mod error;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{run as run_server, run_with_listener};
