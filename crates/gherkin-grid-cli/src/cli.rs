//! Command line arguments.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use gherkin_grid::Direction;

use crate::config::{LogLevel, ReportFormat};
use crate::error::CliError;

/// Edit Gherkin data tables like a spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "gherkin-grid", version, about)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
    /// Report printed after an edit (none, json).
    #[arg(long, global = true)]
    pub report: Option<ReportFormat>,
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Table operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Move the row or column under the caret one place.
    Shift {
        /// File to edit and where to write the result.
        #[command(flatten)]
        edit: EditArgs,
        /// Caret position as LINE:COLUMN.
        #[arg(long)]
        at: Position,
        /// Direction to move in (up, down, left, right).
        direction: Direction,
    },
    /// Paste tab-separated text into the table at the caret.
    Paste {
        /// File to edit and where to write the result.
        #[command(flatten)]
        edit: EditArgs,
        /// Caret position as LINE:COLUMN.
        #[arg(long)]
        at: Position,
        /// Read the pasted text from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the cells touched by a block selection as tab-separated text.
    Copy {
        /// Feature file to read.
        file: PathBuf,
        /// One corner of the block as LINE:COLUMN.
        #[arg(long)]
        from: Position,
        /// The opposite corner of the block as LINE:COLUMN.
        #[arg(long)]
        to: Position,
    },
    /// Blank the cells of a block selection, or drop rows or columns that
    /// are blank already.
    Clear {
        /// File to edit and where to write the result.
        #[command(flatten)]
        edit: EditArgs,
        /// One corner of the block as LINE:COLUMN.
        #[arg(long)]
        from: Position,
        /// The opposite corner of the block as LINE:COLUMN.
        #[arg(long)]
        to: Position,
    },
    /// Insert an empty column where a pipe would be typed.
    InsertColumn {
        /// File to edit and where to write the result.
        #[command(flatten)]
        edit: EditArgs,
        /// Caret position as LINE:COLUMN.
        #[arg(long)]
        at: Position,
    },
    /// Insert an empty row below the caret's row.
    InsertRow {
        /// File to edit and where to write the result.
        #[command(flatten)]
        edit: EditArgs,
        /// Caret position as LINE:COLUMN.
        #[arg(long)]
        at: Position,
    },
}

/// Arguments shared by the commands that rewrite a feature file.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Feature file to edit.
    pub file: PathBuf,
    /// Print the edited document instead of writing it back.
    #[arg(long)]
    pub stdout: bool,
}

/// A 1-based `LINE:COLUMN` position; the column counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Character column, starting at 1.
    pub column: usize,
}

impl FromStr for Position {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidPosition(s.to_string());
        let (line, column) = s.split_once(':').ok_or_else(invalid)?;
        let line: usize = line.trim().parse().map_err(|_| invalid())?;
        let column: usize = column.trim().parse().map_err(|_| invalid())?;
        if line == 0 || column == 0 {
            return Err(invalid());
        }
        Ok(Self { line, column })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
