// Logging setup for the forge256 CLI

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `FORGE256_LOG=debug`.
pub const LOG_ENV: &str = "FORGE256_LOG";

/// Picks the log filter: `FORGE256_LOG`, then `RUST_LOG`, then the default level.
pub fn env_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean.
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
