//! Rendering grids back into pipe-delimited table text.
//!
//! Output is padded with a single space on each side of every cell and is
//! not column-aligned; aligning widths is left to the host formatter.

use crate::{LineEnding, TableLayout};

/// Render `grid` as one `| cell | cell |` line per row.
///
/// # Examples
/// ```
/// use gherkin_grid::{Grid, serialize};
/// let grid: Grid = [["a", ""], ["bb", "c"]].into_iter().collect();
/// assert_eq!(serialize(&grid), "| a |  |\n| bb | c |\n");
/// ```
#[must_use]
pub fn serialize(grid: &crate::Grid) -> String {
    serialize_indented(grid, "")
}

/// Render `grid` like [`serialize`], prefixing every line with `indent`.
#[must_use]
pub fn serialize_indented(grid: &crate::Grid, indent: &str) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        push_row(&mut out, row, indent, LineEnding::Lf);
    }
    out
}

/// Render `grid` in place of `table`, keeping its indent and line ending.
///
/// Comment and blank lines found between the rows of `table` are written
/// back above the row index they preceded; those beyond the last row follow
/// the table.
pub(crate) fn render_table(grid: &crate::Grid, table: &TableLayout) -> String {
    let mut out = String::new();
    let mut interludes = table.interludes.iter().peekable();
    for (y, row) in grid.rows().iter().enumerate() {
        while let Some(interlude) = interludes.next_if(|interlude| interlude.after_rows <= y) {
            out.push_str(&interlude.text);
        }
        push_row(&mut out, row, table.indent(), table.line_ending());
    }
    for interlude in interludes {
        out.push_str(&interlude.text);
    }
    out
}

fn push_row(out: &mut String, row: &[String], indent: &str, ending: LineEnding) {
    out.push_str(indent);
    out.push('|');
    for cell in row {
        out.push(' ');
        out.push_str(cell);
        out.push_str(" |");
    }
    out.push_str(ending.as_str());
}
