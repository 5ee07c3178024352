//! WebSocket client with bounded reconnect.
//!
//! Connects to the echo server, sends a greeting and prints every reply.
//! Exits with status 1 after three failed reconnect attempts in a row.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin wsecho-client -- --url ws://127.0.0.1:8080
//! ```

use std::time::Duration;

use clap::Parser;
use wsecho_client::{ClientConfig, WebSocketClient, config};
use wsecho_shared::{
    EXIT_FAILURE, Lifecycle, exit_code, logger::setup_logger, signal::spawn_signal_listener,
};

#[derive(Debug, Parser)]
#[command(name = "wsecho-client", version, about = "Reconnecting WebSocket client")]
struct Args {
    /// Server URL
    #[arg(short, long, default_value = config::DEFAULT_URL)]
    url: String,

    /// Message sent once after each successful connection
    #[arg(short, long, default_value = config::DEFAULT_GREETING)]
    message: String,

    /// Reconnect attempts in a row before giving up
    #[arg(long, default_value_t = config::DEFAULT_MAX_RECONNECT_ATTEMPTS)]
    max_reconnect_attempts: u32,

    /// Delay before each reconnect attempt, in milliseconds
    #[arg(long, default_value_t = 2000)]
    reconnect_delay_ms: u64,

    /// Timeout of a single connection attempt, in milliseconds
    #[arg(long, default_value_t = 5000)]
    connect_timeout_ms: u64,

    /// Time allowed for the close handshake on shutdown, in milliseconds
    #[arg(long, default_value_t = 1000)]
    shutdown_grace_ms: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl TryFrom<Args> for ClientConfig {
    type Error = wsecho_client::ClientError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let mut config = ClientConfig::new(args.url)?;
        config.greeting = args.message;
        config.max_reconnect_attempts = args.max_reconnect_attempts;
        config.reconnect_delay = Duration::from_millis(args.reconnect_delay_ms);
        config.connect_timeout = Duration::from_millis(args.connect_timeout_ms);
        config.shutdown_grace = Duration::from_millis(args.shutdown_grace_ms);
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match ClientConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to start client: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    let lifecycle = Lifecycle::new();
    let _signals = spawn_signal_listener(lifecycle.clone());

    let mut client = WebSocketClient::new(config, lifecycle);
    let result = client.run().await;
    if let Err(e) = &result {
        tracing::error!("Client error: {}", e);
    }
    std::process::exit(exit_code(&result));
}
