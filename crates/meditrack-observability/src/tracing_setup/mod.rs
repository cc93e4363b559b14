//! Tracing setup: structured logging plus span and event definitions.

pub mod events;
pub mod spans;

use meditrack_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "MEDITRACK_LOG";

/// Initialize the global tracing subscriber.
///
/// Respects the `MEDITRACK_LOG` environment variable for filtering and falls back to
/// `config.log_level`. Logs go to stderr so command output on stdout stays clean.
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true);

    let installed = if config.json {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.compact().try_init()
    };
    installed.is_ok()
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    let filter = EnvFilter::new(filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
