//! Domain layer for the echo server.
//!
//! This module contains the connection model and the repository contract,
//! independent of Axum handlers and DTOs.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{Connection, ConnectionHandle, ConnectionState, OutboundFrame};
pub use error::RepositoryError;
pub use factory::ConnectionIdFactory;
pub use repository::ConnectionRepository;
pub use value_object::{ConnectionId, Payload, Timestamp};
