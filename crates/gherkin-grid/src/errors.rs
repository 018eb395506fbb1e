//! Error types surfaced by the document-facing table operations.
//!
//! The grid engine itself (addressing, merge, shift, serialisation) is total
//! and never fails. Errors only arise at the boundary with the host document:
//! reading and parsing the feature text, or declining an operation whose
//! caret position cannot be mapped onto a table.

use thiserror::Error;

/// Errors raised while loading a feature document or resolving an edit.
///
/// A declined operation leaves the document untouched: no [`TextEdit`] is
/// produced, so there is nothing for the host to apply.
///
/// [`TextEdit`]: crate::TextEdit
///
/// # Examples
/// ```
/// use gherkin_grid::GridError;
/// let err = GridError::NoTableAt(42);
/// assert_eq!(err.to_string(), "no table found at offset 42");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
    /// Failed to read the source `.feature` file.
    #[error("failed to read feature file: {0}")]
    Read(#[from] std::io::Error),
    /// The `.feature` text could not be parsed as Gherkin.
    #[error("failed to parse feature file: {0}")]
    Parse(#[from] gherkin::ParseError),
    /// The offset is not on, beside, or directly below any table.
    #[error("no table found at offset {0}")]
    NoTableAt(usize),
    /// The offset is next to a table but does not resolve to a cell.
    #[error("no table cell found at offset {0}")]
    NoCellAt(usize),
    /// A paste position lies on a table line but cannot be mapped to a
    /// column or row (for example a comment line inside the table).
    #[error("cannot resolve a paste target at offset {0}")]
    AmbiguousTarget(usize),
    /// Pasted content contains neither tabs nor newlines.
    #[error("clipboard content is not tabular")]
    NotTabular,
    /// A 1-based line/column position does not exist in the document.
    #[error("position {line}:{column} is outside the document")]
    PositionOutOfRange {
        /// 1-based line number that was requested.
        line: usize,
        /// 1-based column (in characters) that was requested.
        column: usize,
    },
    /// An edit refers to a byte range that is not valid for the text it is
    /// applied to.
    #[error("edit range {start}..{end} is outside the document")]
    EditOutOfBounds {
        /// Start offset of the rejected edit.
        start: usize,
        /// End offset of the rejected edit.
        end: usize,
    },
}
