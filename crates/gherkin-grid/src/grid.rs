//! Value types for the addressable cell grid.
//!
//! A [`Grid`] is an owned, rectangular snapshot of a table's cell text. It is
//! rebuilt from the document for every operation and never cached, so an
//! edit can never observe stale contents.

/// A zero-based cell position: `x` is the column, `y` the row.
///
/// Row `0` is the header row when the table has one.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Coordinate {
    /// Create a coordinate from a column and a row index.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// An inclusive rectangle of cells, stored with its corners normalised so
/// that `start` is the top-left and `end` the bottom-right cell.
///
/// # Examples
/// ```
/// use gherkin_grid::{CellRange, Coordinate};
/// let range = CellRange::new(Coordinate::new(2, 3), Coordinate::new(0, 1));
/// assert_eq!(range.start(), Coordinate::new(0, 1));
/// assert_eq!(range.end(), Coordinate::new(2, 3));
/// assert_eq!((range.width(), range.height()), (3, 3));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    start: Coordinate,
    end: Coordinate,
}

impl CellRange {
    /// Build the rectangle spanned by two opposite corners.
    #[must_use]
    pub fn new(a: Coordinate, b: Coordinate) -> Self {
        Self {
            start: Coordinate::new(a.x.min(b.x), a.y.min(b.y)),
            end: Coordinate::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// A rectangle covering exactly one cell.
    #[must_use]
    pub fn single(cell: Coordinate) -> Self {
        Self::new(cell, cell)
    }

    /// Top-left cell.
    #[must_use]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    /// Bottom-right cell.
    #[must_use]
    pub const fn end(&self) -> Coordinate {
        self.end
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.end.x - self.start.x + 1
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.end.y - self.start.y + 1
    }

    /// Whether `cell` lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, cell: Coordinate) -> bool {
        cell.x >= self.start.x && cell.x <= self.end.x && cell.y >= self.start.y && cell.y <= self.end.y
    }
}

/// A rectangular table of cell strings, header row first.
///
/// Construction pads short rows with empty strings, so every row of a
/// `Grid` has [`column_count`](Self::column_count) cells.
///
/// # Examples
/// ```
/// use gherkin_grid::{Coordinate, Grid};
/// let grid: Grid = [vec!["a", "b"], vec!["c"]].into_iter().collect();
/// assert_eq!(grid.column_count(), 2);
/// assert_eq!(grid.cell(Coordinate::new(1, 1)), Some(""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid from possibly ragged rows, padding them to the widest.
    #[must_use]
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    /// The identity grid: one row holding one empty cell.
    #[must_use]
    pub fn single_empty() -> Self {
        Self {
            rows: vec![vec![String::new()]],
        }
    }

    /// Number of rows, header included.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in every row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Returns `true` when the grid has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    /// All rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// A single row, if `y` is in range.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[String]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    /// The text of one cell, if the coordinate is in range.
    #[must_use]
    pub fn cell(&self, at: Coordinate) -> Option<&str> {
        self.rows
            .get(at.y)
            .and_then(|row| row.get(at.x))
            .map(String::as_str)
    }

    /// Consumes the grid, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl<R, S> FromIterator<R> for Grid
where
    R: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::from_rows(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_ragged_rows_with_empty_cells() {
        let grid: Grid = [vec!["a"], vec!["b", "c", "d"], vec![]].into_iter().collect();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 3);
        assert!(grid.rows().iter().all(|row| row.len() == 3));
        assert_eq!(grid.cell(Coordinate::new(2, 0)), Some(""));
        assert_eq!(grid.cell(Coordinate::new(0, 2)), Some(""));
    }

    #[test]
    fn empty_grid_has_no_cells() {
        let grid = Grid::default();
        assert!(grid.is_empty());
        assert_eq!(grid.column_count(), 0);
        assert_eq!(grid.cell(Coordinate::new(0, 0)), None);
    }

    #[test]
    fn single_empty_grid_is_one_blank_cell() {
        let grid = Grid::single_empty();
        assert_eq!((grid.column_count(), grid.row_count()), (1, 1));
        assert_eq!(grid.cell(Coordinate::default()), Some(""));
    }

    #[test]
    fn cell_range_contains_its_corners_only_inside() {
        let range = CellRange::new(Coordinate::new(1, 1), Coordinate::new(2, 3));
        assert!(range.contains(Coordinate::new(1, 1)));
        assert!(range.contains(Coordinate::new(2, 3)));
        assert!(!range.contains(Coordinate::new(0, 2)));
        assert!(!range.contains(Coordinate::new(2, 4)));
        assert_eq!(CellRange::single(Coordinate::new(4, 4)).width(), 1);
    }
}
