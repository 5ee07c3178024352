//! Termination signal handling.

use tracing::{debug, info, warn};

use crate::lifecycle::Lifecycle;

/// Wait for a termination signal (Ctrl+C, or SIGTERM on unix)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Spawn a task that turns every termination signal into a shutdown request.
///
/// Only the first signal starts the shutdown sequence; later signals are
/// logged and ignored.
pub fn spawn_signal_listener(lifecycle: Lifecycle) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            shutdown_signal().await;
            if lifecycle.begin_shutdown() {
                info!("Initiating graceful shutdown...");
            } else {
                debug!("Shutdown already in progress, ignoring signal");
            }
        }
    })
}
