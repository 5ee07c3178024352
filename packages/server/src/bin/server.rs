//! WebSocket echo server.
//!
//! Echoes every message back to the client that sent it and closes all
//! connections on Ctrl+C.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin wsecho-server -- --port 8080
//! ```

use std::time::Duration;

use clap::Parser;
use wsecho_server::{ServerConfig, config};
use wsecho_shared::{exit_code, logger::setup_logger};

#[derive(Debug, Parser)]
#[command(name = "wsecho-server", version, about = "WebSocket echo server")]
struct Args {
    /// Host address to bind
    #[arg(long, default_value = config::DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Milliseconds to wait for clients to close during shutdown
    #[arg(long, default_value_t = 1000)]
    shutdown_grace_ms: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            shutdown_grace: Duration::from_millis(args.shutdown_grace_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    let result = wsecho_server::run_server(args.into()).await;
    if let Err(e) = &result {
        tracing::error!("Server error: {}", e);
    }
    std::process::exit(exit_code(&result));
}
