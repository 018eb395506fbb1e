//! Configuration parsed from environment variables.
//!
//! Every setting can be given through an environment variable prefixed with
//! `GHERKIN_GRID_` and overridden by the matching command line flag.

use std::env;
use std::str::FromStr;

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "GHERKIN_GRID_LOG_LEVEL";
/// Environment variable holding the report format.
pub const REPORT_VAR: &str = "GHERKIN_GRID_REPORT";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so that stderr stays quiet unless something goes
/// wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes per-row detail.
    Trace,
    /// Resolved coordinates and grid dimensions.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warning messages for potentially problematic situations.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// What to print about an edit once it has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Print nothing.
    #[default]
    None,
    /// Print the edit, caret and highlight as one line of JSON.
    Json,
}

impl FromStr for ReportFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "json" => Ok(Self::Json),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown report format '{s}', expected one of: none, json"
            ))),
        }
    }
}

/// Configuration for the command line tool.
///
/// # Environment Variables
///
/// - `GHERKIN_GRID_LOG_LEVEL`: Sets the log level (trace, debug, info, warn,
///   error)
/// - `GHERKIN_GRID_REPORT`: Sets the report format (none, json)
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Report printed after an edit.
    pub report: ReportFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };
        let report = match lookup(REPORT_VAR) {
            Some(val) => val.parse()?,
            None => ReportFormat::default(),
        };
        Ok(Self { log_level, report })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        report: Option<ReportFormat>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(report) = report {
            self.report = report;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
