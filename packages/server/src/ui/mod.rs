//! WebSocket echo server implementation.

mod handler;
mod runner;
pub mod state;

pub use runner::{build_router, run, run_with_listener};
