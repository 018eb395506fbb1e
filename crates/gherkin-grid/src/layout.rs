//! Byte-offset layout of pipe-delimited tables embedded in a larger text.
//!
//! The `gherkin` AST keeps the contents of a table but no per-cell spans.
//! [`TableLayout`] recovers them by scanning the raw lines of the table: it
//! records every pipe position, the slot between two pipes, and the trimmed
//! content inside each slot. Offsets are absolute byte offsets into the
//! document that was scanned.

/// A half-open byte range `start..end` within a document.
///
/// # Examples
/// ```
/// use gherkin_grid::TextRange;
/// let range = TextRange::new(4, 8);
/// assert!(range.contains(4));
/// assert!(!range.contains(8));
/// assert!(range.intersects(TextRange::new(7, 12)));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte of the range.
    pub end: usize,
}

impl TextRange {
    /// Create a range from its bounds.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for a zero-length range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `offset` lies within `start..end`.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether the two ranges share at least one byte.
    #[must_use]
    pub const fn intersects(&self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<gherkin::Span> for TextRange {
    fn from(span: gherkin::Span) -> Self {
        Self::new(span.start, span.end)
    }
}

/// Layout of one cell: the slot between its pipes and its trimmed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLayout {
    pub(crate) coordinate: crate::Coordinate,
    pub(crate) slot: TextRange,
    pub(crate) content: TextRange,
}

impl CellLayout {
    /// Grid coordinate of the cell.
    #[must_use]
    pub const fn coordinate(&self) -> crate::Coordinate {
        self.coordinate
    }

    /// Everything between the cell's two pipes, padding included.
    #[must_use]
    pub const fn slot(&self) -> TextRange {
        self.slot
    }

    /// The cell text with surrounding spaces and tabs trimmed.
    #[must_use]
    pub const fn content(&self) -> TextRange {
        self.content
    }

    /// Offset of the pipe opening the cell.
    #[must_use]
    pub const fn left_pipe(&self) -> usize {
        self.slot.start.saturating_sub(1)
    }

    /// Offset of the pipe closing the cell.
    #[must_use]
    pub const fn right_pipe(&self) -> usize {
        self.slot.end
    }

    /// Where a caret should rest when it is moved into this cell: just past
    /// the conventional single padding space.
    #[must_use]
    pub fn caret_offset(&self) -> usize {
        self.left_pipe().saturating_add(2).min(self.right_pipe())
    }
}

/// Layout of one table row on its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub(crate) line: TextRange,
    pub(crate) pipes: Vec<usize>,
    pub(crate) cells: Vec<CellLayout>,
    pub(crate) last_visible: Option<usize>,
}

impl RowLayout {
    /// The source line holding the row, without its line terminator.
    #[must_use]
    pub const fn line(&self) -> TextRange {
        self.line
    }

    /// Cells in column order.
    #[must_use]
    pub fn cells(&self) -> &[CellLayout] {
        &self.cells
    }

    /// A single cell, if `x` is in range.
    #[must_use]
    pub fn cell(&self, x: usize) -> Option<&CellLayout> {
        self.cells.get(x)
    }

    /// The row from its first pipe through its last pipe, inclusive.
    #[must_use]
    pub fn extent(&self) -> TextRange {
        match (self.pipes.first(), self.pipes.last()) {
            (Some(first), Some(last)) => TextRange::new(*first, last.saturating_add(1)),
            _ => TextRange::new(self.line.start, self.line.start),
        }
    }
}

/// Line terminator used by a table's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    fn of_line(text: &str, line: TextRange) -> Self {
        if text.get(line.end..).is_some_and(|rest| rest.starts_with("\r\n")) {
            Self::CrLf
        } else {
            Self::Lf
        }
    }
}

/// Comment and blank lines sitting between two rows of a table, kept
/// verbatim with their terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Interlude {
    /// Number of rows above the lines.
    pub(crate) after_rows: usize,
    pub(crate) text: String,
}

/// Cell-level layout of one table within a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub(crate) rows: Vec<RowLayout>,
    pub(crate) range: TextRange,
    pub(crate) indent: String,
    pub(crate) line_ending: LineEnding,
    pub(crate) interludes: Vec<Interlude>,
}

impl TableLayout {
    /// Scan the table whose first row starts within `span`.
    ///
    /// Lines before the first row are skipped as long as they start inside
    /// `span`. From the first row onwards rows are collected until a line
    /// that is neither a row, a comment nor blank; comment and blank lines
    /// followed by another row belong to the table and are kept as they are.
    /// Returns `None` when no line with at least two pipes is found.
    #[must_use]
    pub fn scan(text: &str, span: TextRange) -> Option<Self> {
        let first_line_start = text
            .get(..span.start.min(text.len()))
            .and_then(|head| head.rfind('\n'))
            .map_or(0, |idx| idx.saturating_add(1));

        let mut rows = Vec::new();
        let mut interludes = Vec::new();
        let mut gap_start = None;
        let mut end = first_line_start;
        for (line, line_start, next_start) in lines_from(text, first_line_start) {
            if let Some(row) = scan_row(line, line_start, rows.len()) {
                if let Some(start) = gap_start.take() {
                    interludes.push(Interlude {
                        after_rows: rows.len(),
                        text: text.get(start..line_start).unwrap_or_default().to_owned(),
                    });
                }
                rows.push(row);
                end = next_start;
            } else if rows.is_empty() {
                if line_start >= span.end {
                    break;
                }
            } else if is_interlude(line) {
                gap_start.get_or_insert(line_start);
            } else {
                break;
            }
        }
        Self::from_rows(text, rows, end, interludes)
    }

    /// Scan a freshly serialised table text that will be placed at `base`.
    ///
    /// Lines of `text` are expected to be table rows as produced by
    /// [`serialize_indented`](crate::serialize_indented). Comment and blank
    /// lines written back between the rows are skipped.
    #[must_use]
    pub fn from_serialized(text: &str, base: usize) -> Option<Self> {
        let mut rows = Vec::new();
        for (line, line_start, _) in lines_from(text, 0) {
            if let Some(row) = scan_row(line, base.saturating_add(line_start), rows.len()) {
                rows.push(row);
            }
        }
        if rows.is_empty() {
            return None;
        }
        let indent_len = text.len() - text.trim_start_matches([' ', '\t']).len();
        let indent = text.get(..indent_len).unwrap_or_default().to_owned();
        let line_ending = if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        Some(Self {
            rows,
            range: TextRange::new(base, base.saturating_add(text.len())),
            indent,
            line_ending,
            interludes: Vec::new(),
        })
    }

    fn from_rows(
        text: &str,
        rows: Vec<RowLayout>,
        end: usize,
        interludes: Vec<Interlude>,
    ) -> Option<Self> {
        let first = rows.first()?;
        let start = first.line.start;
        let indent = first
            .pipes
            .first()
            .and_then(|pipe| text.get(start..*pipe))
            .unwrap_or_default()
            .to_owned();
        let line_ending = LineEnding::of_line(text, first.line);
        Some(Self {
            rows,
            range: TextRange::new(start, end),
            indent,
            line_ending,
            interludes,
        })
    }

    /// Rows in document order, header first.
    #[must_use]
    pub fn rows(&self) -> &[RowLayout] {
        &self.rows
    }

    /// A single row, if `y` is in range.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&RowLayout> {
        self.rows.get(y)
    }

    /// A single cell, if the coordinate is in range.
    #[must_use]
    pub fn cell(&self, at: crate::Coordinate) -> Option<&CellLayout> {
        self.rows.get(at.y).and_then(|row| row.cell(at.x))
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in the widest row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    }

    /// The text replaced when the table is rewritten: from the start of the
    /// first row's line to the end of the last row's line, terminator
    /// included.
    #[must_use]
    pub const fn range(&self) -> TextRange {
        self.range
    }

    /// Leading whitespace in front of the first row.
    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Terminator of the first row's line, used for every rewritten row.
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Returns `true` when comment or blank lines sit between the rows.
    #[must_use]
    pub fn has_interludes(&self) -> bool {
        !self.interludes.is_empty()
    }
}

/// Comment and blank lines may sit inside a table.
fn is_interlude(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#')
}

/// Iterate `(line, line_start, next_line_start)` from `from`, with the line
/// terminator (`\n` or `\r\n`) stripped from `line`.
fn lines_from(text: &str, from: usize) -> impl Iterator<Item = (&str, usize, usize)> {
    let tail = text.get(from..).unwrap_or_default();
    tail.split_inclusive('\n').scan(from, |offset, raw| {
        let start = *offset;
        *offset = offset.saturating_add(raw.len());
        let no_nl = raw.strip_suffix('\n').unwrap_or(raw);
        let line = no_nl.strip_suffix('\r').unwrap_or(no_nl);
        Some((line, start, *offset))
    })
}

fn scan_row(line: &str, line_start: usize, index: usize) -> Option<RowLayout> {
    if !line.trim_start().starts_with('|') {
        return None;
    }
    let bytes = line.as_bytes();
    let pipes = pipe_positions(bytes);
    if pipes.len() < 2 {
        return None;
    }

    let cells = pipes
        .windows(2)
        .enumerate()
        .filter_map(|(x, window)| {
            let &[left, right] = window else {
                return None;
            };
            let slot_start = left.saturating_add(1);
            let (content_start, content_end) = trim_ascii_whitespace(bytes, slot_start, right);
            Some(CellLayout {
                coordinate: crate::Coordinate::new(x, index),
                slot: TextRange::new(line_start + slot_start, line_start + right),
                content: TextRange::new(line_start + content_start, line_start + content_end),
            })
        })
        .collect();

    let visible = line.trim_end().len();
    Some(RowLayout {
        line: TextRange::new(line_start, line_start + line.len()),
        pipes: pipes.iter().map(|pipe| line_start + pipe).collect(),
        cells,
        last_visible: visible.checked_sub(1).map(|last| line_start + last),
    })
}

/// Positions of the unescaped pipes in a row; `\|` belongs to the cell text.
fn pipe_positions(bytes: &[u8]) -> Vec<usize> {
    let mut pipes = Vec::new();
    let mut escaped = false;
    for (idx, b) in bytes.iter().copied().enumerate() {
        match b {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'|' => pipes.push(idx),
            _ => {}
        }
    }
    pipes
}

fn trim_ascii_whitespace(bytes: &[u8], mut start: usize, mut end: usize) -> (usize, usize) {
    while start < end && bytes.get(start).is_some_and(|b| is_ascii_space(*b)) {
        start = start.saturating_add(1);
    }
    while end > start
        && bytes
            .get(end.saturating_sub(1))
            .is_some_and(|b| is_ascii_space(*b))
    {
        end = end.saturating_sub(1);
    }
    (start, end)
}

fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}
