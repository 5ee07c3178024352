//! Logger setup shared by the binaries.

use tracing_subscriber::{EnvFilter, fmt, fmt::time::ChronoLocal};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise the crate that backs `bin_name`
/// (e.g. `wsecho-server` -> `wsecho_server`) and this shared crate log at
/// `default_level`, and `tower_http` logs at `info`.
///
/// Calling this more than once is harmless; only the first call installs
/// the subscriber.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(true)
        .with_target(false)
        .try_init();
}

fn default_directives(bin_name: &str, default_level: &str) -> String {
    let crate_name = bin_name.replace('-', "_");
    format!("{crate_name}={default_level},wsecho_shared={default_level},tower_http=info")
}
