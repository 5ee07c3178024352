//! Test fixtures: an in-process echo server and a client config pointing at it.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use tokio::{net::TcpListener, task::JoinHandle};
use wsecho_client::ClientConfig;
use wsecho_server::{ServerError, run_with_listener};
use wsecho_shared::Lifecycle;

pub const WAIT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestServer {
    addr: SocketAddr,
    lifecycle: Lifecycle,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let lifecycle = Lifecycle::new();
        let handle = tokio::spawn(run_with_listener(
            listener,
            lifecycle.clone(),
            Duration::from_millis(50),
        ));

        Self {
            addr,
            lifecycle,
            handle,
        }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Request shutdown and wait for the server task to finish
    pub async fn shutdown(self) {
        self.lifecycle.begin_shutdown();
        tokio::time::timeout(WAIT_TIMEOUT, self.handle)
            .await
            .expect("Server did not shut down in time")
            .expect("Server task panicked")
            .expect("Server returned an error");
    }
}

/// Client config with short delays for `url`
pub fn fast_config(url: &str) -> ClientConfig {
    let mut config = ClientConfig::new(url).expect("valid url");
    config.reconnect_delay = Duration::from_millis(20);
    config.connect_timeout = Duration::from_secs(1);
    config.shutdown_grace = Duration::from_millis(200);
    config
}

/// A `ws://` URL on which nothing is listening
pub async fn unused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind temporary listener");
    let addr = listener.local_addr().expect("Failed to get local addr");
    drop(listener);
    format!("ws://{}", addr)
}
