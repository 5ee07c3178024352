//! Shared utilities for the wsecho server and client.
//!
//! Both binaries use the same logger setup, the same shutdown gate and the
//! same termination-signal future.

pub mod lifecycle;
pub mod logger;
pub mod signal;
pub mod time;

pub use lifecycle::{Lifecycle, LifecyclePhase};

/// Process exit status for a graceful shutdown.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit status for exhausted reconnects or an unrecoverable startup failure.
pub const EXIT_FAILURE: i32 = 1;

/// Map the outcome of a run to the process exit status.
pub fn exit_code<T, E>(result: &Result<T, E>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}
