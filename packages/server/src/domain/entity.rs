//! Core domain models for the echo server.

use std::net::SocketAddr;

use tokio::sync::mpsc::UnboundedSender;

use super::{
    error::RepositoryError,
    value_object::{ConnectionId, Payload, Timestamp},
};

/// Open/closed state of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Closed,
}

/// A single bidirectional message channel to a peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Connection identifier
    pub id: ConnectionId,
    /// Remote address of the peer
    pub peer_addr: SocketAddr,
    /// Timestamp when the connection was accepted
    pub connected_at: Timestamp,
    /// Current state
    pub state: ConnectionState,
}

impl Connection {
    /// Create a new open connection
    pub fn new(id: ConnectionId, peer_addr: SocketAddr, connected_at: Timestamp) -> Self {
        Self {
            id,
            peer_addr,
            connected_at,
            state: ConnectionState::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Mark the connection as closed
    pub fn close(&mut self) {
        self.state = ConnectionState::Closed;
    }
}

/// Commands understood by a connection's writer task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// Send a payload to the peer
    Payload(Payload),
    /// Ask the peer to close the connection
    Close,
}

/// A registered connection together with its outbound channel
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub connection: Connection,
    sender: UnboundedSender<OutboundFrame>,
}

impl ConnectionHandle {
    pub fn new(connection: Connection, sender: UnboundedSender<OutboundFrame>) -> Self {
        Self { connection, sender }
    }

    pub fn id(&self) -> ConnectionId {
        self.connection.id
    }

    /// Queue a frame for the connection's writer task
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ChannelClosed` if the writer task has gone away
    pub fn send(&self, frame: OutboundFrame) -> Result<(), RepositoryError> {
        self.sender
            .send(frame)
            .map_err(|_| RepositoryError::ChannelClosed(self.connection.id.to_string()))
    }
}
