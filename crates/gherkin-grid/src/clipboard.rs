//! Block selections over a table: copying them out and clearing them.
//!
//! A block selection arrives as one text range per line, the way editors
//! report column-mode selections. Each range selects the cells whose slots
//! it touches.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{CellRange, Coordinate, Grid, TableLayout, TextRange};

/// Cells picked by a block selection, grouped by the line range that
/// selected them. Lines that touched no cell are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    lines: Vec<Vec<Coordinate>>,
}

impl Selection {
    /// Select the cells of `layout` touched by each range of a block
    /// selection.
    ///
    /// A range selects every cell whose slot it intersects; an empty range
    /// selects the cell under it. A range starting past a row's closing pipe
    /// also selects that row's last cell.
    #[must_use]
    pub fn from_ranges(layout: &TableLayout, ranges: &[TextRange]) -> Self {
        let lines = ranges
            .iter()
            .map(|range| cells_in_range(layout, *range))
            .filter(|cells| !cells.is_empty())
            .collect();
        Self { lines }
    }

    /// Select every cell of a rectangle, one line per row.
    #[must_use]
    pub fn from_region(region: CellRange) -> Self {
        let start = region.start();
        let end = region.end();
        let lines = (start.y..=end.y)
            .map(|y| (start.x..=end.x).map(|x| Coordinate::new(x, y)).collect())
            .collect();
        Self { lines }
    }

    /// Selected cells, one entry per selecting line.
    #[must_use]
    pub fn lines(&self) -> &[Vec<Coordinate>] {
        &self.lines
    }

    /// Returns `true` when no cell is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The first selected cell.
    #[must_use]
    pub fn origin(&self) -> Option<Coordinate> {
        self.lines.first().and_then(|line| line.first()).copied()
    }

    /// Most cells selected on any one line.
    #[must_use]
    pub fn width(&self) -> usize {
        self.lines.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of lines that selected at least one cell.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Whether `cell` is selected.
    #[must_use]
    pub fn contains(&self, cell: Coordinate) -> bool {
        self.lines.iter().any(|line| line.contains(&cell))
    }

    /// The rectangle of `width × height` cells anchored on the origin.
    #[must_use]
    pub fn bounding_region(&self) -> Option<CellRange> {
        let origin = self.origin()?;
        Some(CellRange::new(
            origin,
            Coordinate::new(
                origin.x + self.width().saturating_sub(1),
                origin.y + self.height().saturating_sub(1),
            ),
        ))
    }
}

fn cells_in_range(layout: &TableLayout, range: TextRange) -> Vec<Coordinate> {
    if let Some(cell) = layout.cell_at(range.start).filter(|_| range.is_empty()) {
        return vec![cell];
    }
    let mut found = Vec::new();
    for row in layout.rows() {
        let line = row.line();
        if line.start > range.end || range.start > line.end {
            continue;
        }
        found.extend(
            row.cells()
                .iter()
                .filter(|cell| cell.slot().intersects(range))
                .map(crate::CellLayout::coordinate),
        );
        let beyond = row
            .cells()
            .last()
            .filter(|last| range.start > last.right_pipe())
            .map(crate::CellLayout::coordinate)
            .filter(|last| !found.contains(last));
        found.extend(beyond);
    }
    found
}

/// Copy the selected cells as tab-separated text, one line per selecting
/// range, cells trimmed.
#[must_use]
pub fn copy_cells(grid: &Grid, selection: &Selection) -> String {
    selection
        .lines()
        .iter()
        .map(|line| {
            line.iter()
                .map(|cell| grid.cell(*cell).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Copy a rectangle of cells as tab-separated text.
///
/// # Examples
/// ```
/// use gherkin_grid::{CellRange, Coordinate, Grid, copy_region};
/// let grid: Grid = [["a", "b", "c"], ["d", "", "f"]].into_iter().collect();
/// let region = CellRange::new(Coordinate::new(1, 0), Coordinate::new(2, 1));
/// assert_eq!(copy_region(&grid, region), "b\tc\n\tf");
/// ```
#[must_use]
pub fn copy_region(grid: &Grid, region: CellRange) -> String {
    copy_cells(grid, &Selection::from_region(region))
}

/// Blank the selected cells.
///
/// When every selected cell is already blank, clearing removes structure
/// instead: a selection as wide as the grid drops the rows it covers, one as
/// tall as the grid drops the columns it covers. Returns `None` when nothing
/// of the table is left.
#[must_use]
pub fn clear(grid: &Grid, selection: &Selection) -> Option<Grid> {
    let Some(origin) = selection.origin() else {
        return Some(grid.clone());
    };
    let blank = selection
        .lines()
        .iter()
        .flatten()
        .all(|cell| grid.cell(*cell).is_none_or(str::is_empty));

    let dropped_rows: BTreeSet<usize> = if blank && selection.width() == grid.column_count() {
        (origin.y..origin.y + selection.height()).collect()
    } else {
        BTreeSet::new()
    };
    let dropped_columns: BTreeSet<usize> = if blank && selection.height() == grid.row_count() {
        (origin.x..origin.x + selection.width()).collect()
    } else {
        BTreeSet::new()
    };
    debug!(
        cells = selection.lines().iter().map(Vec::len).sum::<usize>(),
        dropped_rows = dropped_rows.len(),
        dropped_columns = dropped_columns.len(),
        "clearing selection"
    );

    let rows: Vec<Vec<String>> = grid
        .rows()
        .iter()
        .enumerate()
        .filter(|(y, _)| !dropped_rows.contains(y))
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(x, _)| !dropped_columns.contains(x))
                .map(|(x, cell)| {
                    if selection.contains(Coordinate::new(x, y)) {
                        String::new()
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    let cleared = Grid::from_rows(rows);
    if cleared.is_empty() {
        None
    } else {
        Some(cleared)
    }
}
