//! Paste-merge of an incoming block into an existing grid.
//!
//! The existing grid is written first and the incoming block second, so
//! pasted cells always overwrite what was there. The output grows to fit
//! both; cells neither grid reaches come out blank.

use tracing::debug;

use crate::{Coordinate, Grid};

/// Where the top-left cell of a pasted block lands.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteTarget {
    /// Insert the block as new columns left of the table, starting at `row`.
    /// Every existing column moves right by the block's width.
    LeftOfTable {
        /// Row receiving the block's first line.
        row: usize,
    },
    /// Overlay the block with its top-left cell at this coordinate.
    At(Coordinate),
}

impl PasteTarget {
    /// The grid coordinate holding the block's top-left cell after merging.
    #[must_use]
    pub const fn anchor(&self) -> Coordinate {
        match *self {
            Self::LeftOfTable { row } => Coordinate::new(0, row),
            Self::At(at) => at,
        }
    }
}

/// A merge output cell: either written by one of the grids or still blank.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Unwritten,
    Written(String),
}

impl Slot {
    fn into_text(self) -> String {
        match self {
            Self::Unwritten => String::new(),
            Self::Written(text) => text,
        }
    }
}

/// Merge `added` into `actual` so that `added`'s first cell lands on
/// `target`.
///
/// # Examples
/// ```
/// use gherkin_grid::{Coordinate, Grid, PasteTarget, merge};
/// let actual: Grid = [["a", "b"], ["c", "d"]].into_iter().collect();
/// let added = Grid::from_delimited_text("x\ty\n");
/// let merged = merge(&actual, &added, PasteTarget::At(Coordinate::new(0, 2)));
/// let expected: Grid = [["a", "b"], ["c", "d"], ["x", "y"]].into_iter().collect();
/// assert_eq!(merged, expected);
/// ```
#[must_use]
pub fn merge(actual: &Grid, added: &Grid, target: PasteTarget) -> Grid {
    let (width, actual_origin, added_origin) = match target {
        PasteTarget::LeftOfTable { row } => (
            added.column_count() + actual.column_count(),
            Coordinate::new(added.column_count(), 0),
            Coordinate::new(0, row),
        ),
        PasteTarget::At(at) => (
            (at.x + added.column_count()).max(actual.column_count()),
            Coordinate::default(),
            at,
        ),
    };
    let height = (added_origin.y + added.row_count()).max(actual.row_count());
    debug!(width, height, ?target, "merging pasted block");

    let mut slots = vec![vec![Slot::Unwritten; width.max(1)]; height.max(1)];
    feed(&mut slots, actual, actual_origin);
    feed(&mut slots, added, added_origin);

    Grid::from_rows(
        slots
            .into_iter()
            .map(|row| row.into_iter().map(Slot::into_text).collect())
            .collect(),
    )
}

fn feed(slots: &mut [Vec<Slot>], cells: &Grid, origin: Coordinate) {
    for (y, row) in cells.rows().iter().enumerate() {
        let Some(target_row) = slots.get_mut(origin.y + y) else {
            continue;
        };
        for (x, cell) in row.iter().enumerate() {
            if let Some(slot) = target_row.get_mut(origin.x + x) {
                *slot = Slot::Written(cell.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn grid<const W: usize, const H: usize>(rows: [[&str; W]; H]) -> Grid {
        rows.into_iter().collect()
    }

    #[test]
    fn empty_block_leaves_the_grid_unchanged() {
        let actual = grid([["a", "b"], ["c", "d"]]);
        for at in [Coordinate::new(0, 0), Coordinate::new(1, 1)] {
            assert_eq!(merge(&actual, &Grid::default(), PasteTarget::At(at)), actual);
        }
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(2, 1)]
    fn single_cell_overwrites_only_its_target(#[case] x: usize, #[case] y: usize) {
        let actual = grid([["a", "b", "c"], ["d", "e", "f"]]);
        let merged = merge(&actual, &grid([["X"]]), PasteTarget::At(Coordinate::new(x, y)));
        assert_eq!(merged.column_count(), 3);
        assert_eq!(merged.row_count(), 2);
        for (ry, row) in merged.rows().iter().enumerate() {
            for (rx, cell) in row.iter().enumerate() {
                let at = Coordinate::new(rx, ry);
                let expected = if (rx, ry) == (x, y) { Some("X") } else { actual.cell(at) };
                assert_eq!(Some(cell.as_str()), expected);
            }
        }
    }

    #[test]
    fn grows_past_the_bottom_right_corner() {
        let actual = grid([["a", "b"], ["c", "d"]]);
        let block = grid([["1", "2"], ["3", "4"]]);
        let merged = merge(&actual, &block, PasteTarget::At(Coordinate::new(2, 2)));
        let expected = grid([
            ["a", "b", "", ""],
            ["c", "d", "", ""],
            ["", "", "1", "2"],
            ["", "", "3", "4"],
        ]);
        assert_eq!(merged, expected);
    }

    #[test]
    fn left_insert_shifts_existing_columns_right() {
        let actual = grid([["NAF", "Ready", "Details"], ["78", "Yes", ""], ["79", "No", "D2"]]);
        let block = grid([["NAF", "Ready"], ["78", "Yes"], ["79", "No"]]);
        let merged = merge(&actual, &block, PasteTarget::LeftOfTable { row: 0 });
        let expected = grid([
            ["NAF", "Ready", "NAF", "Ready", "Details"],
            ["78", "Yes", "78", "Yes", ""],
            ["79", "No", "79", "No", "D2"],
        ]);
        assert_eq!(merged, expected);
    }

    #[test]
    fn left_insert_below_the_header_pads_the_new_columns() {
        let actual = grid([["a"], ["b"]]);
        let merged = merge(&actual, &grid([["x", "y"]]), PasteTarget::LeftOfTable { row: 1 });
        assert_eq!(merged, grid([["", "", "a"], ["x", "y", "b"]]));
    }

    #[test]
    fn paste_wins_over_existing_cells_and_extends_rows() {
        let actual = grid([["Title", "Size"], ["A", "22"], ["C", "144"]]);
        let block = grid([["NAF", "Ready"], ["78", "Yes"], ["79", "No"]]);
        let merged = merge(&actual, &block, PasteTarget::At(Coordinate::new(1, 0)));
        assert_eq!(
            merged,
            grid([["Title", "NAF", "Ready"], ["A", "78", "Yes"], ["C", "79", "No"]])
        );
    }

    #[test]
    fn two_empty_grids_merge_to_a_single_blank_cell() {
        let merged = merge(&Grid::default(), &Grid::default(), PasteTarget::At(Coordinate::default()));
        assert_eq!(merged, Grid::single_empty());
    }

    #[test]
    fn anchor_of_left_insert_is_the_first_column() {
        assert_eq!(
            PasteTarget::LeftOfTable { row: 3 }.anchor(),
            Coordinate::new(0, 3)
        );
    }
}
