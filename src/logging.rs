//! Logging configuration for autoargs.
//!
//! Logs always go to stderr so they never mix with a command's printed result.

use tracing_subscriber::EnvFilter;

/// Builds the event filter: `RUST_LOG` when set, otherwise `default_filter`.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initializes logging to stderr.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_stderr_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
