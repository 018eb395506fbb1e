//! Error types for command line configuration.
//!
//! Failures of the table operations themselves surface as
//! [`gherkin_grid::GridError`] and are reported through `eyre` by the binary.

use thiserror::Error;

/// Errors raised while reading configuration or parsing arguments.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A caret position argument is not of the form `LINE:COLUMN`.
    #[error("invalid position '{0}', expected LINE:COLUMN with both parts starting at 1")]
    InvalidPosition(String),
}
