//! Server bootstrap and graceful shutdown.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use wsecho_shared::{Lifecycle, signal::spawn_signal_listener};

use crate::{
    config::ServerConfig,
    domain::ConnectionRepository,
    error::ServerError,
    infrastructure::repository::InMemoryConnectionRepository,
    ui::{
        handler::{get_connections, health_check, websocket_handler},
        state::AppState,
    },
    usecase::DrainConnectionsUseCase,
};

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/connections", get(get_connections))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until a termination signal
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let lifecycle = Lifecycle::new();
    let _signals = spawn_signal_listener(lifecycle.clone());

    tracing::info!("Press Ctrl+C to shutdown gracefully");
    run_with_listener(listener, lifecycle, config.shutdown_grace).await
}

/// Serve on an already bound listener until `lifecycle` leaves `Running`.
///
/// On shutdown every open connection is asked to close, the server waits
/// `shutdown_grace`, then stops listening.
pub async fn run_with_listener(
    listener: TcpListener,
    lifecycle: Lifecycle,
    shutdown_grace: Duration,
) -> Result<(), ServerError> {
    let local_addr = listener.local_addr()?;

    let repository: Arc<dyn ConnectionRepository> = Arc::new(InMemoryConnectionRepository::new());
    let state = Arc::new(AppState {
        repository: repository.clone(),
        lifecycle: lifecycle.clone(),
    });
    let app = build_router(state);

    tracing::info!("WebSocket echo server listening on ws://{}", local_addr);

    let drain = {
        let lifecycle = lifecycle.clone();
        async move {
            lifecycle.wait_for_shutdown().await;
            DrainConnectionsUseCase::new(repository)
                .execute(shutdown_grace)
                .await;
        }
    };

    // Accept errors are logged and retried inside axum, so serve only
    // resolves once the drain above has completed.
    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(drain)
    .await
    {
        tracing::error!("Listener error: {}", e);
    }

    lifecycle.mark_terminated();
    tracing::info!("Server shut down gracefully");
    Ok(())
}
