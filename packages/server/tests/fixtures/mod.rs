//! Test fixtures shared by the integration tests.
//!
//! Runs the echo server in-process on an ephemeral port.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use tokio::{net::TcpListener, task::JoinHandle};
use wsecho_server::{ServerError, run_with_listener};
use wsecho_shared::Lifecycle;

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestServer {
    addr: SocketAddr,
    lifecycle: Lifecycle,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    /// Start a server with a short shutdown grace period
    pub async fn start() -> Self {
        Self::start_with_grace(Duration::from_millis(100)).await
    }

    pub async fn start_with_grace(shutdown_grace: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let lifecycle = Lifecycle::new();
        let handle = tokio::spawn(run_with_listener(
            listener,
            lifecycle.clone(),
            shutdown_grace,
        ));

        Self {
            addr,
            lifecycle,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Active connection count as reported by the HTTP API
    pub async fn active_connections(&self) -> usize {
        let body: serde_json::Value = reqwest::get(format!("{}/api/connections", self.base_url()))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        body["active_connections"]
            .as_u64()
            .expect("active_connections should be a number") as usize
    }

    /// Poll the HTTP API until the active count equals `expected`
    pub async fn wait_for_active_connections(&self, expected: usize) {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            let current = self.active_connections().await;
            if current == expected {
                return;
            }
            if tokio::time::Instant::now() >= deadline {
                panic!("expected {expected} active connections, still {current}");
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    /// Request shutdown and wait for the server task to finish
    pub async fn shutdown(self) -> Result<(), ServerError> {
        self.lifecycle.begin_shutdown();
        self.join().await
    }

    /// Wait for the server task to finish
    pub async fn join(self) -> Result<(), ServerError> {
        tokio::time::timeout(WAIT_TIMEOUT, self.handle)
            .await
            .expect("Server did not shut down in time")
            .expect("Server task panicked")
    }
}
