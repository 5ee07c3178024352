//! WebSocket connection handlers.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, OutboundFrame, Payload},
    ui::state::AppState,
    usecase::{EchoMessageUseCase, RegisterConnectionUseCase, UnregisterConnectionUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer_addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, StatusCode> {
    if state.lifecycle.is_shutting_down() {
        tracing::warn!(
            "Rejecting connection from {}: server is shutting down",
            peer_addr
        );
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, peer_addr)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, peer_addr: SocketAddr) {
    let (mut sender, mut receiver) = socket.split();

    // Every outbound frame for this connection goes through this channel
    let (tx, mut rx) = mpsc::unbounded_channel::<OutboundFrame>();

    let register_usecase = RegisterConnectionUseCase::new(state.repository.clone());
    let connection_id = match register_usecase.execute(peer_addr, tx.clone()).await {
        Ok(registered) => {
            tracing::info!(
                "New client connected: {} ({}). Active connections: {}",
                peer_addr,
                registered.id,
                registered.active
            );
            registered.id
        }
        Err(e) => {
            tracing::error!("Failed to register connection from {}: {}", peer_addr, e);
            return;
        }
    };

    // The drain may have taken its snapshot before this connection joined the set
    if state.lifecycle.is_shutting_down() {
        tracing::debug!("{} registered during shutdown, requesting close", connection_id);
        if tx.send(OutboundFrame::Close).is_err() {
            tracing::warn!("Failed to request close for {}", connection_id);
        }
    }
    drop(tx);

    // Spawn a task to write echoes and the shutdown close frame to this client
    let mut send_task = tokio::spawn(async move {
        let mut closing = false;
        while let Some(frame) = rx.recv().await {
            if closing {
                continue;
            }
            match frame {
                OutboundFrame::Payload(payload) => {
                    if let Err(e) = sender.send(payload_to_message(payload)).await {
                        tracing::warn!("Failed to send to {}: {}", connection_id, e);
                        break;
                    }
                }
                OutboundFrame::Close => {
                    closing = true;
                    let frame = CloseFrame {
                        code: close_code::NORMAL,
                        reason: Utf8Bytes::from_static("server shutting down"),
                    };
                    if let Err(e) = sender.send(Message::Close(Some(frame))).await {
                        tracing::warn!("Failed to send close to {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        }
    });

    // Spawn a task to receive messages from this client and echo them back
    let echo_usecase = EchoMessageUseCase::new(state.repository.clone());
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on {}: {}", connection_id, e);
                    break;
                }
            };

            let payload = match msg {
                Message::Text(text) => Payload::Text(text.as_str().to_owned()),
                Message::Binary(bytes) => Payload::Binary(bytes.to_vec()),
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                    continue;
                }
                Message::Pong(_) => continue,
                Message::Close(_) => {
                    tracing::info!("Client {} requested close", connection_id);
                    break;
                }
            };

            handle_payload(&echo_usecase, &connection_id, payload).await;
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let unregister_usecase = UnregisterConnectionUseCase::new(state.repository.clone());
    match unregister_usecase.execute(&connection_id).await {
        Ok(unregistered) => {
            tracing::info!(
                "Client disconnected: {} ({}). Active connections: {}",
                peer_addr,
                connection_id,
                unregistered.remaining
            );
        }
        Err(e) => {
            tracing::warn!("Failed to unregister {}: {}", connection_id, e);
        }
    }
}

/// Echo one payload. Errors are logged and the connection stays open.
async fn handle_payload(
    echo_usecase: &EchoMessageUseCase,
    connection_id: &ConnectionId,
    payload: Payload,
) {
    tracing::info!("Received from {}: {}", connection_id, payload);

    match echo_usecase.execute(connection_id, payload).await {
        Ok(echoed) => tracing::info!("Echoed to {}: {}", connection_id, echoed),
        Err(e) => tracing::error!("Error processing message from {}: {}", connection_id, e),
    }
}

fn payload_to_message(payload: Payload) -> Message {
    match payload {
        Payload::Text(text) => Message::Text(text.into()),
        Payload::Binary(bytes) => Message::Binary(bytes.into()),
    }
}
