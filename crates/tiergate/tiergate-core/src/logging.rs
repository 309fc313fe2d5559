//! Logging setup for hosts that do not install their own subscriber.

use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter.
pub const LOG_ENV_VAR: &str = "TIERGATE_LOG";

/// Install a fmt subscriber filtered by `TIERGATE_LOG`, or by
/// `default_filter` when the variable is unset or unparsable.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
