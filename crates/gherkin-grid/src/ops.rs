//! Table edits driven by a caret position in a feature document.
//!
//! Every operation extracts a fresh [`Grid`] from the document, transforms
//! it, and hands back a single [`TextEdit`] replacing the table's text along
//! with where the caret and highlight should go. Nothing here mutates the
//! document; applying the edit is up to the caller.

use tracing::debug;

use crate::{
    CellLayout, CellRange, Coordinate, Direction, FeatureDocument, Grid, GridError, PasteTarget,
    Selection, Side, TableLayout, TextRange,
};

/// One atomic text replacement.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// The replaced span of the original text.
    pub range: TextRange,
    /// Text written in place of `range`.
    pub new_text: String,
}

impl TextEdit {
    /// Apply the edit to `text`, returning the edited copy.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EditOutOfBounds`] when the range is reversed,
    /// runs past the end of `text`, or splits a character.
    ///
    /// # Examples
    /// ```
    /// use gherkin_grid::{TextEdit, TextRange};
    /// let edit = TextEdit { range: TextRange::new(2, 3), new_text: "b".into() };
    /// assert_eq!(edit.apply("| a |").unwrap(), "| b |");
    /// ```
    pub fn apply(&self, text: &str) -> Result<String, GridError> {
        let TextRange { start, end } = self.range;
        let bounds = || GridError::EditOutOfBounds { start, end };
        if start > end {
            return Err(bounds());
        }
        let head = text.get(..start).ok_or_else(bounds)?;
        let tail = text.get(end..).ok_or_else(bounds)?;
        let mut out = String::with_capacity(head.len() + self.new_text.len() + tail.len());
        out.push_str(head);
        out.push_str(&self.new_text);
        out.push_str(tail);
        Ok(out)
    }
}

/// The result of a table operation: the edit to apply, and where the caret
/// and highlight belong once it has been applied.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Replacement of the whole table text.
    pub edit: TextEdit,
    /// Caret offset in the edited document.
    pub caret: usize,
    /// Span of the edited document to highlight, if any.
    pub highlight: Option<TextRange>,
}

fn table_for(document: &FeatureDocument, offset: usize) -> Result<&TableLayout, GridError> {
    document.table_at(offset).ok_or(GridError::NoTableAt(offset))
}

/// The serialised replacement for a table and its layout once applied.
struct Rewrite {
    edit: TextEdit,
    layout: Option<TableLayout>,
}

impl Rewrite {
    fn new(table: &TableLayout, grid: &Grid) -> Self {
        let new_text = crate::serialize::render_table(grid, table);
        let layout = TableLayout::from_serialized(&new_text, table.range().start);
        Self {
            edit: TextEdit {
                range: table.range(),
                new_text,
            },
            layout,
        }
    }

    fn cell(&self, at: Coordinate) -> Option<&CellLayout> {
        self.layout.as_ref().and_then(|layout| layout.cell(at))
    }

    fn outcome(
        self,
        caret: impl FnOnce(&CellLayout) -> usize,
        at: Coordinate,
        highlight: impl FnOnce(&TableLayout) -> Option<TextRange>,
    ) -> EditOutcome {
        let fallback = self.edit.range.start;
        let caret = self.cell(at).map_or(fallback, caret);
        let highlight = self.layout.as_ref().and_then(highlight);
        EditOutcome {
            edit: self.edit,
            caret,
            highlight,
        }
    }
}

/// Move the row or column under the caret one place in `direction`.
///
/// The caret follows the moved cell and the whole moved row or column is
/// highlighted. At the table's edge the table is rewritten unchanged.
///
/// # Errors
///
/// Returns [`GridError::NoTableAt`] when no table is at `offset` and
/// [`GridError::NoCellAt`] when the caret is not inside a cell.
pub fn shift_at(
    document: &FeatureDocument,
    offset: usize,
    direction: Direction,
) -> Result<EditOutcome, GridError> {
    let table = table_for(document, offset)?;
    let at = table.cell_at(offset).ok_or(GridError::NoCellAt(offset))?;
    let grid = Grid::from_table(table, document.text());
    let shifted = crate::shift(&grid, at, direction);
    debug!(?at, to = ?shifted.coordinate, %direction, "shift at caret");

    let moved = shifted.coordinate;
    Ok(Rewrite::new(table, &shifted.grid).outcome(
        CellLayout::caret_offset,
        moved,
        |layout| {
            if direction.is_horizontal() {
                crate::column_highlight(layout, moved.x)
            } else {
                crate::row_highlight(layout, moved.y)
            }
        },
    ))
}

/// Where a block pasted at `offset` would land in `table`.
///
/// A caret inside a cell targets that cell. Left of the table the block is
/// inserted as new leading columns, right of it as new trailing columns. On
/// any line below the table the block is appended as new rows starting at
/// the first column.
///
/// # Errors
///
/// Returns [`GridError::AmbiguousTarget`] when the caret is between the
/// table's outer pipe columns but not on a cell, or when its row cannot be
/// determined and it is not below the table.
pub fn resolve_paste_target(
    table: &TableLayout,
    text: &str,
    offset: usize,
) -> Result<PasteTarget, GridError> {
    let column = match (table.column_index_at(offset), table.horizontal_side(text, offset)) {
        (Some(x), _) => Some(x),
        (None, Side::Left) => None,
        (None, Side::Right) => Some(table.row(0).map_or(0, |header| header.cells().len())),
        (None, Side::Inside) => return Err(GridError::AmbiguousTarget(offset)),
    };

    if let Some(y) = table.row_index_at(offset) {
        return Ok(column.map_or(PasteTarget::LeftOfTable { row: y }, |x| {
            PasteTarget::At(Coordinate::new(x, y))
        }));
    }
    let table_end = table.rows().last().map_or(0, |row| row.line().end);
    if offset > table_end {
        Ok(PasteTarget::At(Coordinate::new(0, table.row_count())))
    } else {
        Err(GridError::AmbiguousTarget(offset))
    }
}

/// Paste tab-separated `clipboard` text into the table at `offset`.
///
/// The pasted block overwrites the cells it covers and the table grows to
/// fit it. The caret lands at the start of the block's first cell and the
/// whole block is highlighted.
///
/// # Errors
///
/// Returns [`GridError::NotTabular`] when `clipboard` holds neither tabs nor
/// newlines, [`GridError::NoTableAt`] when no table is at `offset`, and
/// [`GridError::AmbiguousTarget`] when no target cell can be chosen.
pub fn paste_at(
    document: &FeatureDocument,
    offset: usize,
    clipboard: &str,
) -> Result<EditOutcome, GridError> {
    if !clipboard.contains(['\t', '\n']) {
        return Err(GridError::NotTabular);
    }
    let table = table_for(document, offset)?;
    let target = resolve_paste_target(table, document.text(), offset)?;
    let actual = Grid::from_table(table, document.text());
    let added = Grid::from_delimited_text(clipboard);
    let merged = crate::merge(&actual, &added, target);

    let anchor = target.anchor();
    let block = CellRange::new(
        anchor,
        Coordinate::new(
            anchor.x + added.column_count().saturating_sub(1),
            anchor.y + added.row_count().saturating_sub(1),
        ),
    );
    debug!(?target, columns = added.column_count(), rows = added.row_count(), "paste at caret");

    Ok(Rewrite::new(table, &merged).outcome(
        |cell| cell.slot().start,
        anchor,
        |layout| crate::highlight_range_for(layout, block),
    ))
}

/// Copy the cells touched by a block selection as tab-separated text.
///
/// The table is the one holding the first range. An empty selection copies
/// nothing.
///
/// # Errors
///
/// Returns [`GridError::NoTableAt`] when the first range is not on a table
/// and [`GridError::NoCellAt`] when no range touches a cell.
pub fn copy_selection(
    document: &FeatureDocument,
    ranges: &[TextRange],
) -> Result<String, GridError> {
    let Some(first) = ranges.first() else {
        return Ok(String::new());
    };
    let table = table_for(document, first.start)?;
    let selection = Selection::from_ranges(table, ranges);
    if selection.is_empty() {
        return Err(GridError::NoCellAt(first.start));
    }
    let grid = Grid::from_table(table, document.text());
    debug!(lines = selection.height(), "copy selection");
    Ok(crate::copy_cells(&grid, &selection))
}

/// Cut a block selection: blank its cells, or drop its rows or columns when
/// they were blank already.
///
/// Removing every row or column deletes the table text outright.
///
/// # Errors
///
/// Returns [`GridError::NoTableAt`] when the first range is not on a table
/// and [`GridError::NoCellAt`] when no range touches a cell.
pub fn clear_selection(
    document: &FeatureDocument,
    ranges: &[TextRange],
) -> Result<EditOutcome, GridError> {
    let start = ranges.first().map_or(0, |range| range.start);
    let table = table_for(document, start)?;
    let selection = Selection::from_ranges(table, ranges);
    let origin = selection.origin().ok_or(GridError::NoCellAt(start))?;
    let grid = Grid::from_table(table, document.text());

    let Some(cleared) = crate::clear(&grid, &selection) else {
        debug!(?origin, "cleared the whole table");
        return Ok(EditOutcome {
            edit: TextEdit {
                range: table.range(),
                new_text: crate::serialize::render_table(&Grid::default(), table),
            },
            caret: table.range().start,
            highlight: None,
        });
    };

    let at = crate::clamp_coordinate(&cleared, origin);
    let region = selection.bounding_region().map(|region| {
        CellRange::new(
            crate::clamp_coordinate(&cleared, region.start()),
            crate::clamp_coordinate(&cleared, region.end()),
        )
    });
    debug!(?origin, ?region, "cleared selection");

    Ok(Rewrite::new(table, &cleared).outcome(
        CellLayout::caret_offset,
        at,
        |layout| region.and_then(|region| crate::highlight_range_for(layout, region)),
    ))
}

/// Insert an empty column where a pipe was typed at `offset`.
///
/// Left of the table the column becomes the first, right of it the last.
/// Inside a cell it goes after that cell, or before it when the caret is
/// within two characters of the cell's opening pipe. The caret moves into
/// the new column on the caret's row.
///
/// # Errors
///
/// Returns [`GridError::NoTableAt`] when no table is at `offset` and
/// [`GridError::NoCellAt`] when the caret's row or cell cannot be resolved.
pub fn insert_column_at(
    document: &FeatureDocument,
    offset: usize,
) -> Result<EditOutcome, GridError> {
    let table = table_for(document, offset)?;
    let row = table.row_index_at(offset).ok_or(GridError::NoCellAt(offset))?;
    let grid = Grid::from_table(table, document.text());

    let index = match table.horizontal_side(document.text(), offset) {
        Side::Left => 0,
        Side::Right => grid.column_count(),
        Side::Inside => {
            let cell = table
                .cell_at(offset)
                .and_then(|at| table.cell(at))
                .ok_or(GridError::NoCellAt(offset))?;
            let x = cell.coordinate().x;
            if (1..=2).contains(&offset.saturating_sub(cell.left_pipe())) {
                x
            } else {
                x + 1
            }
        }
    };
    debug!(index, row, "insert column at caret");

    let grown = crate::insert_column(&grid, index);
    Ok(Rewrite::new(table, &grown).outcome(
        CellLayout::caret_offset,
        Coordinate::new(index, row),
        |layout| crate::column_highlight(layout, index),
    ))
}

/// Insert an empty row below the caret's row, keeping the caret's column.
///
/// A row is always inserted, below the last row too. This differs from the
/// Enter key in table-aware editors, which inserts nothing at the end of the
/// last row so that a new step can be typed under the table.
///
/// # Errors
///
/// Returns [`GridError::NoTableAt`] when no table is at `offset` and
/// [`GridError::NoCellAt`] when the caret's row cannot be resolved.
pub fn insert_row_after(
    document: &FeatureDocument,
    offset: usize,
) -> Result<EditOutcome, GridError> {
    let table = table_for(document, offset)?;
    let y = table.row_index_at(offset).ok_or(GridError::NoCellAt(offset))?;
    let x = table.column_index_at(offset).unwrap_or(0);
    let grid = Grid::from_table(table, document.text());
    let below = y + 1;
    debug!(row = below, "insert row at caret");

    let grown = crate::insert_row(&grid, below);
    Ok(Rewrite::new(table, &grown).outcome(
        CellLayout::caret_offset,
        Coordinate::new(x, below),
        |layout| crate::row_highlight(layout, below),
    ))
}
