//! Text ranges to highlight after a table has been rewritten.

use crate::{CellRange, Coordinate, TableLayout, TextRange};

/// The span bounding `region` in `layout`, pipes included.
///
/// The range runs from the pipe opening the region's top-left cell through
/// the pipe closing its bottom-right cell. `layout` should describe the table
/// text as it reads after the edit. Returns `None` when either corner is not
/// a cell of `layout`.
///
/// # Examples
/// ```
/// use gherkin_grid::{CellRange, Coordinate, TableLayout, TextRange, highlight_range_for};
/// let text = "| a | b |\n| c | d |\n";
/// let layout = TableLayout::scan(text, TextRange::new(0, 1)).unwrap();
/// let region = CellRange::new(Coordinate::new(1, 0), Coordinate::new(1, 1));
/// assert_eq!(highlight_range_for(&layout, region), Some(TextRange::new(4, 19)));
/// ```
#[must_use]
pub fn highlight_range_for(layout: &TableLayout, region: CellRange) -> Option<TextRange> {
    let first = layout.cell(region.start())?;
    let last = layout.cell(region.end())?;
    Some(TextRange::new(
        first.left_pipe(),
        last.right_pipe().saturating_add(1),
    ))
}

/// Highlight for column `x`, from the header row down to the last row.
#[must_use]
pub fn column_highlight(layout: &TableLayout, x: usize) -> Option<TextRange> {
    let last_row = layout.row_count().checked_sub(1)?;
    highlight_range_for(
        layout,
        CellRange::new(Coordinate::new(x, 0), Coordinate::new(x, last_row)),
    )
}

/// Highlight for row `y`, from its opening to its closing pipe.
#[must_use]
pub fn row_highlight(layout: &TableLayout, y: usize) -> Option<TextRange> {
    let last_cell = layout.row(y)?.cells().len().checked_sub(1)?;
    highlight_range_for(
        layout,
        CellRange::new(Coordinate::new(0, y), Coordinate::new(last_cell, y)),
    )
}
