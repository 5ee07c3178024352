//! HTTP API response DTOs for the echo server.

use serde::{Deserialize, Serialize};

/// Summary of the connection set for the connections endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSummaryDto {
    pub active_connections: usize,
    pub connections: Vec<ConnectionDetailDto>,
}

/// A single active connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionDetailDto {
    pub id: String,
    pub peer_addr: String,
    pub connected_at: String, // ISO 8601
}
