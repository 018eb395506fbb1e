//! Grid editing for Gherkin data tables.
//!
//! This crate treats the pipe-delimited tables of a `.feature` file (step
//! data tables and Examples tables) as rectangular grids of cells. It
//! provides the operations an editor needs to work on them as a
//! spreadsheet: moving rows and columns, pasting tab-separated blocks,
//! copying and cutting block selections, and inserting rows and columns.
//!
//! # Overview
//!
//! The engine is split into pure grid transformations and a thin layer that
//! binds them to document text:
//!
//! - [`Grid`] values are extracted from a [`TableLayout`] or from clipboard
//!   text, transformed by [`merge`], [`shift`], [`clear`],
//!   [`insert_column`] or [`insert_row`], and rendered back with
//!   [`serialize`].
//! - [`FeatureDocument`] parses a feature with the `gherkin` crate and
//!   indexes the byte layout of every table.
//! - The caret-driven operations ([`shift_at`], [`paste_at`],
//!   [`copy_selection`], [`clear_selection`], [`insert_column_at`],
//!   [`insert_row_after`]) return an [`EditOutcome`]: one [`TextEdit`]
//!   replacing the table plus the caret offset and highlight range to show
//!   afterwards.
//!
//! The document is never modified; applying the edit is left to the caller.
//!
//! # Example
//!
//! ```
//! use gherkin_grid::{FeatureDocument, paste_at};
//!
//! let text = "Feature: f\n  Scenario: s\n    Given a grid\n      | a | b |\n      | c | d |\n\n";
//! let document = FeatureDocument::parse(text)?;
//! let below = document.offset_at(6, 1)?;
//! let outcome = paste_at(&document, below, "x\ty\n")?;
//! let edited = outcome.edit.apply(document.text())?;
//! assert!(edited.contains("      | c | d |\n      | x | y |\n"));
//! # Ok::<(), gherkin_grid::GridError>(())
//! ```

mod addressing;
mod clipboard;
mod document;
mod errors;
mod extract;
mod grid;
mod layout;
mod merge;
mod ops;
mod selection;
mod serialize;
mod shift;
mod structure;

pub use addressing::{Side, clamp_column, clamp_coordinate, clamp_row};
pub use clipboard::{Selection, clear, copy_cells, copy_region};
pub use document::{FeatureDocument, load_feature_file};
pub use errors::GridError;
pub use grid::{CellRange, Coordinate, Grid};
pub use layout::{CellLayout, LineEnding, RowLayout, TableLayout, TextRange};
pub use merge::{PasteTarget, merge};
pub use ops::{
    EditOutcome, TextEdit, clear_selection, copy_selection, insert_column_at, insert_row_after,
    paste_at, resolve_paste_target, shift_at,
};
pub use selection::{column_highlight, highlight_range_for, row_highlight};
pub use serialize::{serialize, serialize_indented};
pub use shift::{Direction, ShiftOutcome, adjacent_swap, shift};
pub use structure::{insert_column, insert_row};
