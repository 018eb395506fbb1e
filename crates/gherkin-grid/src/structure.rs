//! Growing a grid by one empty row or column.

use crate::Grid;

/// Insert an empty column before column `index`.
///
/// An `index` past the last column appends the column on the right.
///
/// # Examples
/// ```
/// use gherkin_grid::{Grid, insert_column};
/// let grid: Grid = [["a", "b"]].into_iter().collect();
/// let expected: Grid = [["a", "", "b"]].into_iter().collect();
/// assert_eq!(insert_column(&grid, 1), expected);
/// ```
#[must_use]
pub fn insert_column(grid: &Grid, index: usize) -> Grid {
    let at = index.min(grid.column_count());
    let rows = grid
        .rows()
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.insert(at, String::new());
            row
        })
        .collect();
    Grid::from_rows(rows)
}

/// Insert an empty row before row `index`, appending when `index` is past
/// the last row.
#[must_use]
pub fn insert_row(grid: &Grid, index: usize) -> Grid {
    let mut rows = grid.rows().to_vec();
    let at = index.min(rows.len());
    rows.insert(at, vec![String::new(); grid.column_count().max(1)]);
    Grid::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn grid() -> Grid {
        [["a", "b"], ["c", "d"]].into_iter().collect()
    }

    #[rstest]
    #[case::first(0, [["", "a", "b"], ["", "c", "d"]])]
    #[case::last(2, [["a", "b", ""], ["c", "d", ""]])]
    #[case::past_the_end(9, [["a", "b", ""], ["c", "d", ""]])]
    fn inserts_columns(#[case] index: usize, #[case] expected: [[&str; 3]; 2]) {
        let expected: Grid = expected.into_iter().collect();
        assert_eq!(insert_column(&grid(), index), expected);
    }

    #[rstest]
    #[case::top(0, 0)]
    #[case::middle(1, 1)]
    #[case::bottom(5, 2)]
    fn inserts_blank_rows(#[case] index: usize, #[case] blank_at: usize) {
        let grown = insert_row(&grid(), index);
        assert_eq!(grown.row_count(), 3);
        assert_eq!(grown.row(blank_at), Some([String::new(), String::new()].as_slice()));
    }
}
