//! Moving a row or column one position in a given direction.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::{Coordinate, Grid};

/// Direction of a shift.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Swap the row with the one above it.
    Up,
    /// Swap the row with the one below it.
    Down,
    /// Swap the column with the one on its left.
    Left,
    /// Swap the column with the one on its right.
    Right,
}

impl Direction {
    /// Returns `true` for [`Left`](Self::Left) and [`Right`](Self::Right).
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The direction undoing this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    const fn is_forward(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(format!(
                "unknown direction '{s}', expected one of: up, down, left, right"
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// The shifted grid and where the moved row or column now sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftOutcome {
    /// Grid with the row or column moved.
    pub grid: Grid,
    /// New coordinate of the cell that was shifted.
    pub coordinate: Coordinate,
}

/// Identity order of `len` indices with `index` swapped with its neighbour.
///
/// Returns the identity when `index` has no neighbour in that direction, so
/// shifting off an edge is a no-op.
///
/// # Examples
/// ```
/// use gherkin_grid::adjacent_swap;
/// assert_eq!(adjacent_swap(4, 1, true), vec![0, 2, 1, 3]);
/// assert_eq!(adjacent_swap(4, 3, true), vec![0, 1, 2, 3]);
/// assert_eq!(adjacent_swap(4, 0, false), vec![0, 1, 2, 3]);
/// ```
#[must_use]
pub fn adjacent_swap(len: usize, index: usize, forward: bool) -> Vec<usize> {
    let neighbour = if forward {
        index.checked_add(1)
    } else {
        index.checked_sub(1)
    }
    .filter(|n| *n < len && index < len);
    (0..len)
        .map(|i| match neighbour {
            Some(n) if i == index => n,
            Some(n) if i == n => index,
            _ => i,
        })
        .collect()
}

/// Move the row (for [`Direction::Up`]/[`Direction::Down`]) or the column
/// (for [`Direction::Left`]/[`Direction::Right`]) holding `at` by one place.
///
/// `at` is clamped into the grid first. Shifting is its own inverse: shifting
/// the outcome back from its new coordinate restores the original grid.
#[must_use]
pub fn shift(grid: &Grid, at: Coordinate, direction: Direction) -> ShiftOutcome {
    let at = crate::clamp_coordinate(grid, at);
    let forward = direction.is_forward();
    let (columns, rows): (Vec<usize>, Vec<usize>) = if direction.is_horizontal() {
        (
            adjacent_swap(grid.column_count(), at.x, forward),
            (0..grid.row_count()).collect(),
        )
    } else {
        (
            (0..grid.column_count()).collect(),
            adjacent_swap(grid.row_count(), at.y, forward),
        )
    };

    let shifted: Vec<Vec<String>> = rows
        .iter()
        .filter_map(|y| grid.row(*y))
        .map(|row| columns.iter().filter_map(|x| row.get(*x)).cloned().collect())
        .collect();
    let coordinate = Coordinate::new(position_of(&columns, at.x), position_of(&rows, at.y));
    debug!(%direction, from = ?at, to = ?coordinate, "shifted table");

    ShiftOutcome {
        grid: Grid::from_rows(shifted),
        coordinate,
    }
}

fn position_of(order: &[usize], index: usize) -> usize {
    order.iter().position(|i| *i == index).unwrap_or(index)
}
