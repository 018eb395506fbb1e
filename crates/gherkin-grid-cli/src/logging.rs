//! Structured logging with environment variable configuration.
//!
//! Logs are written to stderr so that stdout carries only copied cells,
//! edited documents and reports.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `GHERKIN_GRID_LOG_LEVEL`
/// 3. Default configuration value
///
/// If a global subscriber is already set, this function silently ignores
/// the error.
pub fn init_logging(config: &CliConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    // The first subscriber wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
