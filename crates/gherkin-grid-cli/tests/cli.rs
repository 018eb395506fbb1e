//! End-to-end tests for the `gherkin-grid` binary.

use std::fs;
use std::io::Write;
use std::str;

use assert_cmd::Command;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

const FEATURE: &str = concat!(
    "Feature: Orders\n",
    "  Scenario Outline: Shipping\n",
    "    Given an order for <item>\n",
    "\n",
    "    Examples:\n",
    "      | item  | price |\n",
    "      | apple | 3     |\n",
    "      | pear  | 4     |\n",
);

#[fixture]
fn feature() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".feature")
        .tempfile()
        .unwrap_or_else(|err| panic!("temp file: {err}"));
    file.write_all(FEATURE.as_bytes())
        .unwrap_or_else(|err| panic!("write feature: {err}"));
    file
}

fn gherkin_grid() -> Command {
    let mut command =
        Command::cargo_bin("gherkin-grid").unwrap_or_else(|err| panic!("binary exists: {err}"));
    command.env_remove("GHERKIN_GRID_LOG_LEVEL");
    command.env_remove("GHERKIN_GRID_REPORT");
    command
}

fn read(file: &NamedTempFile) -> String {
    fs::read_to_string(file.path()).unwrap_or_else(|err| panic!("read feature: {err}"))
}

#[rstest]
fn shift_rewrites_the_file(feature: NamedTempFile) {
    let output = gherkin_grid()
        .arg("shift")
        .arg(feature.path())
        .args(["--at", "7:9", "up"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    assert!(read(&feature).ends_with(concat!(
        "    Examples:\n",
        "      | apple | 3 |\n",
        "      | item | price |\n",
        "      | pear | 4 |\n",
    )));
}

#[rstest]
fn copy_prints_tab_separated_cells(feature: NamedTempFile) {
    let output = gherkin_grid()
        .arg("copy")
        .arg(feature.path())
        .args(["--from", "6:9", "--to", "8:17"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).unwrap_or_else(|err| panic!("utf8: {err}"));
    assert_eq!(stdout, "item\tprice\napple\t3\npear\t4\n");
}

#[rstest]
fn paste_below_the_table_appends_rows(feature: NamedTempFile) {
    let output = gherkin_grid()
        .arg("paste")
        .arg(feature.path())
        .args(["--at", "9:1", "--stdout"])
        .write_stdin("plum\t5\nfig\t6\n")
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).unwrap_or_else(|err| panic!("utf8: {err}"));
    assert!(stdout.ends_with(concat!(
        "      | pear | 4 |\n",
        "      | plum | 5 |\n",
        "      | fig | 6 |\n",
    )));
    assert_eq!(read(&feature), FEATURE);
}

#[rstest]
fn json_report_describes_the_edit(feature: NamedTempFile) {
    let output = gherkin_grid()
        .arg("insert-column")
        .arg(feature.path())
        .args(["--at", "7:7", "--report", "json"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)
        .unwrap_or_else(|err| panic!("json report: {err}"));
    assert!(report.get("highlight").is_some_and(|range| !range.is_null()));
    assert!(read(&feature).contains("      |  | item | price |\n"));
}

#[rstest]
fn declined_operation_exits_with_failure(feature: NamedTempFile) {
    let output = gherkin_grid()
        .arg("paste")
        .arg(feature.path())
        .args(["--at", "6:9"])
        .write_stdin("no tabs here")
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert_eq!(output.status.code(), Some(1));
    let stderr = str::from_utf8(&output.stderr).unwrap_or_else(|err| panic!("utf8: {err}"));
    assert!(stderr.contains("clipboard content is not tabular"));
    assert_eq!(read(&feature), FEATURE);
}

#[rstest]
fn invalid_environment_configuration_exits_with_two(feature: NamedTempFile) {
    let output = gherkin_grid()
        .env("GHERKIN_GRID_LOG_LEVEL", "chatty")
        .arg("copy")
        .arg(feature.path())
        .args(["--from", "6:9", "--to", "6:9"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert_eq!(output.status.code(), Some(2));
    let stderr = str::from_utf8(&output.stderr).unwrap_or_else(|err| panic!("utf8: {err}"));
    assert!(stderr.contains("unknown log level"));
}
