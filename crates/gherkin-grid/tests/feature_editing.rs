//! Editing step tables inside complete feature files.

use std::io::Write;

use gherkin_grid::{
    Direction, EditOutcome, FeatureDocument, GridError, copy_selection, insert_column_at,
    load_feature_file, paste_at, shift_at,
};
use rstest::{fixture, rstest};

const FEATURE: &str = concat!(
    "Feature: Stock\n",
    "\n",
    "  Scenario: Restocking\n",
    "    Given the shelf holds\n",
    "      | fruit | count |\n",
    "      | apple | 2     |\n",
    "    When the order arrives\n",
    "      | fruit | count |\n",
    "      | pear  | 5     |\n",
    "    Then the shelf is full\n",
);

#[fixture]
fn document() -> FeatureDocument {
    FeatureDocument::parse(FEATURE).unwrap_or_else(|err| panic!("feature should parse: {err}"))
}

fn offset(document: &FeatureDocument, line: usize, column: usize) -> usize {
    document
        .offset_at(line, column)
        .unwrap_or_else(|err| panic!("position {line}:{column}: {err}"))
}

fn apply(document: &FeatureDocument, outcome: &EditOutcome) -> FeatureDocument {
    let text = outcome
        .edit
        .apply(document.text())
        .unwrap_or_else(|err| panic!("edit should apply: {err}"));
    FeatureDocument::parse(text).unwrap_or_else(|err| panic!("edited feature should parse: {err}"))
}

#[rstest]
fn every_step_table_is_found(document: FeatureDocument) {
    assert_eq!(document.tables().len(), 2);
}

#[rstest]
fn edits_touch_only_the_table_under_the_caret(document: FeatureDocument) {
    let outcome = shift_at(&document, offset(&document, 8, 9), Direction::Right)
        .unwrap_or_else(|err| panic!("shift should succeed: {err}"));
    let edited = apply(&document, &outcome);

    let expected = FEATURE.replace(
        "      | fruit | count |\n      | pear  | 5     |\n",
        "      | count | fruit |\n      | 5 | pear |\n",
    );
    assert_eq!(edited.text(), expected);
    assert_eq!(edited.position_of(outcome.caret), (8, 17));
}

#[rstest]
fn copied_cells_paste_into_another_table(document: FeatureDocument) {
    let ranges = document
        .block_ranges(6..=6, 9..=17)
        .unwrap_or_else(|err| panic!("block should resolve: {err}"));
    let copied = copy_selection(&document, &ranges)
        .unwrap_or_else(|err| panic!("copy should succeed: {err}"));
    assert_eq!(copied, "apple\t2");

    let outcome = paste_at(&document, offset(&document, 9, 9), &copied)
        .unwrap_or_else(|err| panic!("paste should succeed: {err}"));
    let edited = apply(&document, &outcome);
    assert!(edited.text().contains("      | fruit | count |\n      | apple | 2 |\n    Then"));
}

#[rstest]
fn operations_are_declined_away_from_tables(document: FeatureDocument) {
    let on_step = offset(&document, 4, 5);
    assert!(matches!(
        insert_column_at(&document, on_step),
        Err(GridError::NoTableAt(_))
    ));
    assert!(matches!(
        shift_at(&document, offset(&document, 1, 1), Direction::Down),
        Err(GridError::NoTableAt(_))
    ));
}

#[test]
fn edits_a_feature_loaded_from_disk() {
    let mut file = tempfile::Builder::new()
        .suffix(".feature")
        .tempfile()
        .unwrap_or_else(|err| panic!("temp file: {err}"));
    file.write_all(FEATURE.as_bytes())
        .unwrap_or_else(|err| panic!("write feature: {err}"));

    let document =
        load_feature_file(file.path()).unwrap_or_else(|err| panic!("feature should load: {err}"));
    let outcome = insert_column_at(&document, offset(&document, 5, 7))
        .unwrap_or_else(|err| panic!("insert should succeed: {err}"));
    let edited = apply(&document, &outcome);
    assert!(edited.text().contains("      |  | fruit | count |\n      |  | apple | 2 |\n"));
    assert_eq!(edited.tables().len(), 2);
}
