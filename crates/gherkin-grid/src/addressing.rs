//! Coordinate math between text offsets and grid cells.
//!
//! Lookups run against the interval index held by [`TableLayout`]: rows are
//! sorted by line, cells by slot, so an offset resolves with two binary
//! searches and no tree walking.

use crate::{Coordinate, Grid, TableLayout};

/// Where a text position sits horizontally relative to a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left of the first row's first cell.
    Left,
    /// Between the first row's opening and closing pipes.
    Inside,
    /// Right of the first row's closing pipe.
    Right,
}

impl TableLayout {
    /// Index of the row whose source line contains `offset`.
    #[must_use]
    pub fn row_on_line(&self, offset: usize) -> Option<usize> {
        let idx = self.rows.partition_point(|row| row.line.end < offset);
        self.rows
            .get(idx)
            .filter(|row| row.line.start <= offset)
            .map(|_| idx)
    }

    /// Resolve the cell under `offset`.
    ///
    /// Padding belongs to the cell whose slot holds it. On a pipe, the cell
    /// before it wins; the opening pipe of a row resolves to the first cell
    /// and the closing pipe to the last. Positions outside a row's pipes, or
    /// on lines that are not rows, resolve to nothing.
    ///
    /// # Examples
    /// ```
    /// use gherkin_grid::{Coordinate, TableLayout, TextRange};
    /// let text = "| a | b |\n";
    /// let layout = TableLayout::scan(text, TextRange::new(0, 1)).unwrap();
    /// assert_eq!(layout.cell_at(2), Some(Coordinate::new(0, 0)));
    /// assert_eq!(layout.cell_at(4), Some(Coordinate::new(0, 0)));
    /// assert_eq!(layout.cell_at(5), Some(Coordinate::new(1, 0)));
    /// assert_eq!(layout.cell_at(9), None);
    /// ```
    #[must_use]
    pub fn cell_at(&self, offset: usize) -> Option<Coordinate> {
        let row = self.rows.get(self.row_on_line(offset)?)?;
        if !row.extent().contains(offset) {
            return None;
        }
        let before = row.pipes.partition_point(|pipe| *pipe < offset);
        row.cells
            .get(before.saturating_sub(1))
            .map(|cell| cell.coordinate)
    }

    /// Resolve the row under `offset`.
    ///
    /// Falls back to the last visible character of the same source line when
    /// `offset` itself is outside the row's pipes, so a caret in the margin
    /// of a row still finds it.
    #[must_use]
    pub fn row_index_at(&self, offset: usize) -> Option<usize> {
        self.cell_at(offset).map(|cell| cell.y).or_else(|| {
            let row = self.rows.get(self.row_on_line(offset)?)?;
            self.cell_at(row.last_visible?).map(|cell| cell.y)
        })
    }

    /// Resolve the column under `offset`; see [`cell_at`](Self::cell_at).
    #[must_use]
    pub fn column_index_at(&self, offset: usize) -> Option<usize> {
        self.cell_at(offset).map(|cell| cell.x)
    }

    /// Classify the column of `offset` within its line against the first
    /// row's opening and closing pipe columns.
    ///
    /// A caret on the opening pipe's column, being in front of the first
    /// cell, counts as left of the table. `text` must be the document the
    /// layout was scanned from. Columns are counted in characters so that
    /// the comparison holds across lines.
    #[must_use]
    pub fn horizontal_side(&self, text: &str, offset: usize) -> Side {
        let Some(header) = self.rows.first() else {
            return Side::Inside;
        };
        let caret = column_of(text, offset);
        let opening = header.pipes.first().map_or(0, |pipe| column_of(text, *pipe));
        let closing = header.pipes.last().map_or(0, |pipe| column_of(text, *pipe));
        if caret <= opening {
            Side::Left
        } else if caret > closing {
            Side::Right
        } else {
            Side::Inside
        }
    }
}

/// Zero-based character column of `offset` within its line.
pub(crate) fn column_of(text: &str, offset: usize) -> usize {
    let head = text.get(..offset.min(text.len())).unwrap_or_default();
    let line_start = head.rfind('\n').map_or(0, |idx| idx.saturating_add(1));
    head.get(line_start..).map_or(0, |line| line.chars().count())
}

/// Clamp a column index into `0..grid.column_count()`.
///
/// Negative values clamp to `0`, values past the last column clamp to the
/// last column.
///
/// # Examples
/// ```
/// use gherkin_grid::{Grid, clamp_column};
/// let grid: Grid = [["a", "b", "c"]].into_iter().collect();
/// assert_eq!(clamp_column(&grid, -4), 0);
/// assert_eq!(clamp_column(&grid, 1), 1);
/// assert_eq!(clamp_column(&grid, 9), 2);
/// ```
#[must_use]
pub fn clamp_column(grid: &Grid, x: isize) -> usize {
    clamp_index(x, grid.column_count())
}

/// Clamp a row index into `0..grid.row_count()`; see [`clamp_column`].
#[must_use]
pub fn clamp_row(grid: &Grid, y: isize) -> usize {
    clamp_index(y, grid.row_count())
}

/// Clamp both axes of a coordinate into the grid.
#[must_use]
pub fn clamp_coordinate(grid: &Grid, at: Coordinate) -> Coordinate {
    Coordinate::new(
        at.x.min(grid.column_count().saturating_sub(1)),
        at.y.min(grid.row_count().saturating_sub(1)),
    )
}

fn clamp_index(value: isize, extent: usize) -> usize {
    usize::try_from(value)
        .unwrap_or(0)
        .min(extent.saturating_sub(1))
}
