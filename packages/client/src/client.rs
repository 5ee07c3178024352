//! Reconnecting client with graceful shutdown.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};
use wsecho_shared::Lifecycle;

use crate::{
    config::ClientConfig,
    connector::{Connector, TungsteniteConnector, WsStream},
    error::ClientError,
    event::{ClientEvent, next_event},
    reconnect::{ReconnectDecision, ReconnectState},
};

/// Result of a single connection attempt
enum ConnectOutcome {
    Connected(WsStream),
    Failed(ClientError),
    Shutdown,
}

/// What the dispatch loop does after handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionControl {
    Continue,
    /// The connection went away without a local shutdown request
    Lost,
    /// Shutdown requested while the connection is still open
    Close,
    /// Shutdown requested and the connection is already closed
    Closed,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Lost,
    Shutdown,
}

/// WebSocket client holding one outbound connection at a time
pub struct WebSocketClient<C = TungsteniteConnector> {
    config: ClientConfig,
    connector: C,
    lifecycle: Lifecycle,
    reconnect: ReconnectState,
    inbound: Option<mpsc::UnboundedSender<String>>,
}

impl WebSocketClient<TungsteniteConnector> {
    pub fn new(config: ClientConfig, lifecycle: Lifecycle) -> Self {
        Self::with_connector(config, lifecycle, TungsteniteConnector)
    }
}

impl<C: Connector> WebSocketClient<C> {
    pub fn with_connector(config: ClientConfig, lifecycle: Lifecycle, connector: C) -> Self {
        let reconnect = ReconnectState::new(config.max_reconnect_attempts, config.reconnect_delay);
        Self {
            config,
            connector,
            lifecycle,
            reconnect,
            inbound: None,
        }
    }

    /// Forward every inbound payload to `sender` in addition to logging it
    pub fn with_inbound(mut self, sender: mpsc::UnboundedSender<String>) -> Self {
        self.inbound = Some(sender);
        self
    }

    /// Reconnect attempts made since the last successful connection
    pub fn reconnect_attempts(&self) -> u32 {
        self.reconnect.attempts()
    }

    /// Connect and keep the connection alive until shutdown.
    ///
    /// Returns `Ok(())` after a graceful shutdown and
    /// `Err(ClientError::RetriesExhausted)` once reconnecting gave up.
    pub async fn run(&mut self) -> Result<(), ClientError> {
        info!("Connecting to WebSocket server: {}", self.config.url);

        loop {
            match self.connect().await {
                ConnectOutcome::Connected(ws) => {
                    self.on_connected();
                    match self.run_session(ws).await {
                        SessionEnd::Shutdown => return self.finish(),
                        SessionEnd::Lost => warn!("Connection lost"),
                    }
                }
                ConnectOutcome::Failed(e) => error!("Connection error: {}", e),
                ConnectOutcome::Shutdown => return self.finish(),
            }

            match self.reconnect.next_attempt() {
                ReconnectDecision::GiveUp { attempts } => {
                    error!("Max reconnection attempts reached. Exiting...");
                    return Err(ClientError::RetriesExhausted(attempts));
                }
                ReconnectDecision::Retry { attempt, delay } => {
                    info!(
                        "Attempting to reconnect ({}/{})...",
                        attempt,
                        self.reconnect.max_attempts()
                    );
                    let lifecycle = self.lifecycle.clone();
                    tokio::select! {
                        biased;
                        _ = lifecycle.wait_for_shutdown() => return self.finish(),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }

    /// One connection attempt, bounded by the connect timeout
    async fn connect(&self) -> ConnectOutcome {
        if self.lifecycle.is_shutting_down() {
            return ConnectOutcome::Shutdown;
        }

        let timeout = self.config.connect_timeout;
        let attempt = tokio::time::timeout(timeout, self.connector.connect(&self.config.url));
        tokio::select! {
            biased;
            _ = self.lifecycle.wait_for_shutdown() => ConnectOutcome::Shutdown,
            result = attempt => match result {
                Ok(Ok(ws)) => ConnectOutcome::Connected(ws),
                Ok(Err(e)) => ConnectOutcome::Failed(e),
                Err(_) => ConnectOutcome::Failed(ClientError::ConnectTimeout(timeout)),
            },
        }
    }

    fn on_connected(&mut self) {
        let retries = self.reconnect.attempts();
        if retries > 0 {
            info!(
                "Successfully connected after {} {}",
                retries,
                if retries == 1 { "retry" } else { "retries" }
            );
        }
        self.reconnect.reset();
        info!("Connected to WebSocket server");
        info!("Press Ctrl+C to shutdown gracefully");
    }

    /// Send the greeting, then dispatch events until the session ends
    async fn run_session(&mut self, mut ws: WsStream) -> SessionEnd {
        let greeting = self.config.greeting.clone();
        if let Err(e) = ws.send(Message::text(greeting.clone())).await {
            error!("WebSocket error: {}", e);
            return SessionEnd::Lost;
        }
        info!("Sent: {}", greeting);

        let lifecycle = self.lifecycle.clone();
        loop {
            let event = next_event(&mut ws, &lifecycle).await;
            match self.dispatch(event) {
                SessionControl::Continue => {}
                SessionControl::Lost => return SessionEnd::Lost,
                SessionControl::Close => {
                    self.close_gracefully(ws).await;
                    return SessionEnd::Shutdown;
                }
                SessionControl::Closed => return SessionEnd::Shutdown,
            }
        }
    }

    fn dispatch(&self, event: ClientEvent) -> SessionControl {
        match event {
            ClientEvent::MessageReceived(text) => {
                info!("Received: {}", text);
                if let Some(inbound) = &self.inbound
                    && inbound.send(text).is_err()
                {
                    debug!("Inbound receiver dropped");
                }
                SessionControl::Continue
            }
            ClientEvent::Closed(reason) => {
                if self.lifecycle.is_shutting_down() {
                    info!("Connection closed gracefully");
                    return SessionControl::Closed;
                }
                if let Some(reason) = reason.filter(|r| !r.is_empty()) {
                    warn!("Server closed the connection: {}", reason);
                }
                SessionControl::Lost
            }
            ClientEvent::Errored(e) => {
                error!("WebSocket error: {}", e);
                if self.lifecycle.is_shutting_down() {
                    SessionControl::Closed
                } else {
                    SessionControl::Lost
                }
            }
            ClientEvent::ShutdownRequested => SessionControl::Close,
        }
    }

    /// Send a close frame and wait up to the shutdown grace for the reply
    async fn close_gracefully(&self, mut ws: WsStream) {
        info!("Closing connection...");
        if let Err(e) = ws.close(None).await {
            debug!("Failed to send close frame: {}", e);
            return;
        }

        let grace = self.config.shutdown_grace;
        let handshake = tokio::time::timeout(grace, async {
            while let Some(Ok(message)) = ws.next().await {
                if message.is_close() {
                    break;
                }
            }
        })
        .await;

        match handshake {
            Ok(()) => info!("Connection closed gracefully"),
            Err(_) => warn!("Close handshake not completed within {:?}", grace),
        }
    }

    fn finish(&self) -> Result<(), ClientError> {
        self.lifecycle.mark_terminated();
        info!("Goodbye!");
        Ok(())
    }
}
