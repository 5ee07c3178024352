//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use wsecho_shared::time::timestamp_to_rfc3339;

use crate::{
    infrastructure::dto::http::{ConnectionDetailDto, ConnectionSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the set of active connections
pub async fn get_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionSummaryDto> {
    let connections = state.repository.get_connections().await;

    let summary = ConnectionSummaryDto {
        active_connections: connections.len(),
        connections: connections
            .iter()
            .map(|c| ConnectionDetailDto {
                id: c.id.to_string(),
                peer_addr: c.peer_addr.to_string(),
                connected_at: timestamp_to_rfc3339(c.connected_at.value()),
            })
            .collect(),
    };

    Json(summary)
}
