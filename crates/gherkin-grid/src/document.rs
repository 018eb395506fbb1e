//! Feature documents and the tables they contain.
//!
//! [`FeatureDocument`] parses the source with the `gherkin` crate to find the
//! span of every step data table and Examples table, then scans the raw lines
//! of each span into a [`TableLayout`]. Offsets are byte offsets into the
//! normalised text returned by [`FeatureDocument::text`].

use std::ops::RangeInclusive;
use std::path::Path;

use gherkin::GherkinEnv;
use tracing::{debug, warn};

use crate::{GridError, TableLayout, TextRange};

/// A parsed `.feature` text and the layouts of its tables, in document
/// order.
#[derive(Debug, Clone)]
pub struct FeatureDocument {
    text: String,
    tables: Vec<TableLayout>,
}

impl FeatureDocument {
    /// Parse feature text and index its tables.
    ///
    /// A missing trailing newline is appended before parsing, matching what
    /// the `gherkin` parser expects.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Parse`] when the text is not valid Gherkin.
    pub fn parse(text: impl Into<String>) -> Result<Self, GridError> {
        let mut text = text.into();
        normalise_trailing_newline(&mut text);
        let feature = gherkin::Feature::parse(text.as_str(), GherkinEnv::default())?;

        let mut tables: Vec<TableLayout> = table_spans(&feature)
            .into_iter()
            .filter_map(|span| {
                let layout = TableLayout::scan(&text, span);
                if layout.is_none() {
                    warn!(start = span.start, end = span.end, "table span holds no rows");
                }
                layout
            })
            .collect();
        tables.sort_by_key(|table| table.range().start);
        tables.dedup_by_key(|table| table.range().start);
        debug!(tables = tables.len(), "indexed feature tables");

        Ok(Self { text, tables })
    }

    /// The normalised source text all offsets refer to.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every table in document order.
    #[must_use]
    pub fn tables(&self) -> &[TableLayout] {
        &self.tables
    }

    /// The table an offset belongs to.
    ///
    /// That is the table with a row on the offset's line (margins included)
    /// or whose range holds the offset, or failing that the table whose end
    /// is followed by nothing but whitespace up to the offset.
    #[must_use]
    pub fn table_at(&self, offset: usize) -> Option<&TableLayout> {
        self.tables
            .iter()
            .find(|table| table.row_on_line(offset).is_some() || table.range().contains(offset))
            .or_else(|| {
                self.tables.iter().rev().find(|table| {
                    let end = table.range().end;
                    offset >= end
                        && self
                            .text
                            .get(end..offset)
                            .is_some_and(|gap| gap.chars().all(char::is_whitespace))
                })
            })
    }

    /// Byte offset of a 1-based line and character column.
    ///
    /// Column `n + 1` of a line holding `n` characters addresses the end of
    /// that line.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::PositionOutOfRange`] when the line or column does
    /// not exist.
    ///
    /// # Examples
    /// ```
    /// use gherkin_grid::FeatureDocument;
    /// let doc = FeatureDocument::parse("Feature: é\n").unwrap();
    /// assert_eq!(doc.offset_at(1, 11).unwrap(), 11);
    /// assert!(doc.offset_at(1, 12).is_err());
    /// ```
    pub fn offset_at(&self, line: usize, column: usize) -> Result<usize, GridError> {
        let out_of_range = || GridError::PositionOutOfRange { line, column };
        let (start, content) = self.line(line).ok_or_else(out_of_range)?;
        let chars = column.checked_sub(1).ok_or_else(out_of_range)?;
        byte_of_char(content, chars)
            .map(|byte| start + byte)
            .ok_or_else(out_of_range)
    }

    /// A column-mode selection: one range per line of `lines`, spanning the
    /// 1-based character `columns` on that line.
    ///
    /// Columns past the end of a line are clamped to it, so short lines
    /// contribute an empty range at their end.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::PositionOutOfRange`] when a line does not exist.
    pub fn block_ranges(
        &self,
        lines: RangeInclusive<usize>,
        columns: RangeInclusive<usize>,
    ) -> Result<Vec<TextRange>, GridError> {
        let first = columns.start().saturating_sub(1);
        let last = columns.end().saturating_sub(1);
        lines
            .map(|line| {
                let (start, content) = self.line(line).ok_or(GridError::PositionOutOfRange {
                    line,
                    column: *columns.start(),
                })?;
                let clamp = |chars| byte_of_char(content, chars).unwrap_or(content.len());
                Ok(TextRange::new(start + clamp(first), start + clamp(last)))
            })
            .collect()
    }

    /// Start offset and content, terminator stripped, of a 1-based line.
    fn line(&self, line: usize) -> Option<(usize, &str)> {
        let mut start = 0;
        for (idx, raw) in self.text.split('\n').enumerate() {
            if idx.saturating_add(1) == line {
                return Some((start, raw.strip_suffix('\r').unwrap_or(raw)));
            }
            start += raw.len() + 1;
        }
        None
    }

    /// The 1-based line and character column of `offset`.
    #[must_use]
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let head = self.text.get(..offset.min(self.text.len())).unwrap_or_default();
        let line = head.matches('\n').count() + 1;
        (line, crate::addressing::column_of(&self.text, offset) + 1)
    }
}

/// Read and parse a `.feature` file.
///
/// # Errors
///
/// Returns [`GridError::Read`] when the file cannot be read and
/// [`GridError::Parse`] when it is not valid Gherkin.
pub fn load_feature_file(path: &Path) -> Result<FeatureDocument, GridError> {
    let text = std::fs::read_to_string(path)?;
    FeatureDocument::parse(text)
}

/// Byte index of the `chars`-th character; one past the last character
/// maps to the end of `content`.
fn byte_of_char(content: &str, chars: usize) -> Option<usize> {
    content
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(content.len()))
        .nth(chars)
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

fn table_spans(feature: &gherkin::Feature) -> Vec<TextRange> {
    let mut spans = Vec::new();
    if let Some(background) = feature.background.as_ref() {
        collect_step_tables(&background.steps, &mut spans);
    }
    for scenario in &feature.scenarios {
        collect_scenario_tables(scenario, &mut spans);
    }
    for rule in &feature.rules {
        if let Some(background) = rule.background.as_ref() {
            collect_step_tables(&background.steps, &mut spans);
        }
        for scenario in &rule.scenarios {
            collect_scenario_tables(scenario, &mut spans);
        }
    }
    spans
}

fn collect_scenario_tables(scenario: &gherkin::Scenario, spans: &mut Vec<TextRange>) {
    collect_step_tables(&scenario.steps, spans);
    spans.extend(
        scenario
            .examples
            .iter()
            .filter_map(|examples| examples.table.as_ref())
            .map(|table| TextRange::from(table.span)),
    );
}

fn collect_step_tables(steps: &[gherkin::Step], spans: &mut Vec<TextRange>) {
    spans.extend(
        steps
            .iter()
            .filter_map(|step| step.table.as_ref())
            .map(|table| TextRange::from(table.span)),
    );
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const FEATURE: &str = concat!(
        "Feature: Tables\n",
        "  Background:\n",
        "    Given the stock\n",
        "      | item | qty |\n",
        "      | nut  | 4   |\n",
        "\n",
        "  Scenario Outline: ordering\n",
        "    When I order <n>\n",
        "\n",
        "    Examples:\n",
        "      | n |\n",
        "      | 1 |\n",
        "      | 2 |\n",
        "\n",
        "  Rule: rules have tables too\n",
        "    Scenario: rule\n",
        "      Then I see\n",
        "        | x |\n",
    );

    #[fixture]
    fn document() -> FeatureDocument {
        let Ok(document) = FeatureDocument::parse(FEATURE) else {
            panic!("feature should parse");
        };
        document
    }

    #[rstest]
    fn finds_tables_in_background_examples_and_rules(document: FeatureDocument) {
        let shapes: Vec<(usize, usize)> = document
            .tables()
            .iter()
            .map(|table| (table.row_count(), table.column_count()))
            .collect();
        assert_eq!(shapes, vec![(2, 2), (3, 1), (1, 1)]);
    }

    #[rstest]
    fn table_ranges_cover_whole_row_lines(document: FeatureDocument) {
        let Some(first) = document.tables().first() else {
            panic!("expected a table");
        };
        let range = first.range();
        assert_eq!(
            document.text().get(range.start..range.end),
            Some("      | item | qty |\n      | nut  | 4   |\n")
        );
        assert_eq!(first.indent(), "      ");
    }

    #[rstest]
    #[case::row_margin(4, 2, Some(0))]
    #[case::inside_cell(4, 10, Some(0))]
    #[case::blank_line_below(6, 1, Some(0))]
    #[case::step_line(3, 8, None)]
    #[case::examples_row(12, 9, Some(1))]
    #[case::keyword_line(10, 5, None)]
    #[case::last_table(18, 11, Some(2))]
    fn locates_tables(
        document: FeatureDocument,
        #[case] line: usize,
        #[case] column: usize,
        #[case] expected: Option<usize>,
    ) {
        let Ok(offset) = document.offset_at(line, column) else {
            panic!("position should exist");
        };
        let found = document.table_at(offset).and_then(|table| {
            document
                .tables()
                .iter()
                .position(|candidate| candidate.range() == table.range())
        });
        assert_eq!(found, expected);
    }

    #[rstest]
    #[case(1, 1, 0)]
    #[case(2, 3, 18)]
    #[case(1, 16, 15)]
    fn converts_positions_to_offsets(
        document: FeatureDocument,
        #[case] line: usize,
        #[case] column: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(document.offset_at(line, column).ok(), Some(expected));
        assert_eq!(document.position_of(expected), (line, column));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0)]
    #[case(1, 17)]
    #[case(40, 1)]
    fn rejects_positions_outside_the_document(
        document: FeatureDocument,
        #[case] line: usize,
        #[case] column: usize,
    ) {
        assert!(matches!(
            document.offset_at(line, column),
            Err(GridError::PositionOutOfRange { .. })
        ));
    }

    #[rstest]
    fn block_ranges_clamp_to_short_lines(document: FeatureDocument) {
        let Ok(ranges) = document.block_ranges(3..=4, 10..=16) else {
            panic!("lines should exist");
        };
        let texts: Vec<&str> = ranges
            .iter()
            .filter_map(|range| document.text().get(range.start..range.end))
            .collect();
        assert_eq!(texts, vec![" the s", "tem | "]);

        let Ok(ranges) = document.block_ranges(6..=6, 3..=9) else {
            panic!("blank line should exist");
        };
        assert!(ranges.iter().all(TextRange::is_empty));
        assert!(document.block_ranges(1..=99, 1..=2).is_err());
    }

    #[test]
    fn appends_a_missing_trailing_newline() {
        let Ok(document) = FeatureDocument::parse("Feature: x") else {
            panic!("feature should parse");
        };
        assert_eq!(document.text(), "Feature: x\n");
        assert!(document.tables().is_empty());
    }

    #[test]
    fn invalid_gherkin_is_a_parse_error() {
        let result = FeatureDocument::parse("this is not gherkin\n");
        assert!(matches!(result, Err(GridError::Parse(_))));
    }

    #[test]
    fn loads_feature_files_from_disk() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("stock.feature");
        std::fs::write(&path, FEATURE).unwrap_or_else(|err| panic!("write: {err}"));
        let Ok(document) = load_feature_file(&path) else {
            panic!("feature should load");
        };
        assert_eq!(document.tables().len(), 3);
        assert!(matches!(
            load_feature_file(&dir.path().join("missing.feature")),
            Err(GridError::Read(_))
        ));
    }
}
