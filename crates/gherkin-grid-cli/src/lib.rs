//! Command line front end for `gherkin-grid`.
//!
//! Each subcommand loads a `.feature` file, runs one table operation at a
//! caret position or over a block selection, and writes the edited document
//! back (or to stdout with `--stdout`).
//!
//! # Configuration
//!
//! - `GHERKIN_GRID_LOG_LEVEL`: Log verbosity (trace, debug, info, warn,
//!   error)
//! - `GHERKIN_GRID_REPORT`: Report printed after an edit (none, json)
//!
//! Both are overridden by the matching command line flags.
//!
//! # Example
//!
//! ```text
//! gherkin-grid shift login.feature --at 12:9 right
//! printf 'x\ty\n' | gherkin-grid paste login.feature --at 14:7 --stdout
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
