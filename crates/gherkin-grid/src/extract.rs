//! Reading grids out of table layouts and clipboard text.

use tracing::trace;

use crate::{Grid, TableLayout};

impl Grid {
    /// Read the cells of a scanned table, header row first.
    ///
    /// Each cell is trimmed of the spaces and tabs padding it inside its
    /// pipes; interior whitespace is kept. `text` must be the document the
    /// layout was scanned from. Rows of differing widths are padded with
    /// empty cells.
    #[must_use]
    pub fn from_table(layout: &TableLayout, text: &str) -> Self {
        let rows = layout
            .rows()
            .iter()
            .map(|row| {
                row.cells()
                    .iter()
                    .map(|cell| {
                        let content = cell.content();
                        text.get(content.start..content.end)
                            .unwrap_or_default()
                            .to_owned()
                    })
                    .collect::<Vec<_>>()
            })
            .inspect(|cells| trace!(cells = cells.len(), "extracted table row"))
            .collect();
        Self::from_rows(rows)
    }

    /// Read a block of tab-separated cells, one row per line.
    ///
    /// This is the layout spreadsheets put on the clipboard. Cells are
    /// trimmed, a trailing line terminator does not start an extra row, and
    /// empty input yields [`Grid::single_empty`].
    ///
    /// # Examples
    /// ```
    /// use gherkin_grid::Grid;
    /// let grid = Grid::from_delimited_text("x\ty\n1\t\n");
    /// let expected: Grid = [vec!["x", "y"], vec!["1", ""]].into_iter().collect();
    /// assert_eq!(grid, expected);
    /// ```
    #[must_use]
    pub fn from_delimited_text(text: &str) -> Self {
        let rows: Vec<Vec<String>> = text
            .lines()
            .map(|line| line.split('\t').map(|cell| cell.trim().to_owned()).collect())
            .collect();
        if rows.is_empty() {
            return Self::single_empty();
        }
        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{Coordinate, TextRange};

    #[test]
    fn reads_trimmed_cells_in_source_order() {
        let text = "  | name  | a  b |\n  |  x |     |\n";
        let Some(layout) = TableLayout::scan(text, TextRange::new(0, 1)) else {
            panic!("table should be scanned");
        };
        let grid = Grid::from_table(&layout, text);
        let expected: Grid = [vec!["name", "a  b"], vec!["x", ""]].into_iter().collect();
        assert_eq!(grid, expected);
    }

    #[test]
    fn pads_short_rows_from_malformed_tables() {
        let text = "| a | b | c |\n| d |\n";
        let Some(layout) = TableLayout::scan(text, TextRange::new(0, 1)) else {
            panic!("table should be scanned");
        };
        let grid = Grid::from_table(&layout, text);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.cell(Coordinate::new(2, 1)), Some(""));
    }

    #[rstest]
    #[case::empty("", 1, 1)]
    #[case::single_cell("x", 1, 1)]
    #[case::one_row("x\ty\n", 2, 1)]
    #[case::crlf("a\tb\r\nc\td\r\n", 2, 2)]
    #[case::ragged("a\nb\tc\td", 3, 2)]
    #[case::trailing_tab("Yes\t", 2, 1)]
    fn delimited_text_dimensions(
        #[case] text: &str,
        #[case] columns: usize,
        #[case] rows: usize,
    ) {
        let grid = Grid::from_delimited_text(text);
        assert_eq!((grid.column_count(), grid.row_count()), (columns, rows));
    }

    #[test]
    fn delimited_cells_are_trimmed() {
        let grid = Grid::from_delimited_text(" Ready \t Details\n Yes\t\n");
        let expected: Grid = [vec!["Ready", "Details"], vec!["Yes", ""]].into_iter().collect();
        assert_eq!(grid, expected);
    }
}
