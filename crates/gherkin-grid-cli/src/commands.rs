//! Dispatch of parsed commands onto the table operations.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use eyre::{Context, Result};
use gherkin_grid::{EditOutcome, FeatureDocument, TextRange, load_feature_file};
use tracing::info;

use crate::cli::{Cli, Command, EditArgs, Position};
use crate::config::{CliConfig, ReportFormat};

/// Run `cli` against the file it names.
///
/// Pasted text is read from `stdin` unless a file is given. Copied cells,
/// documents requested with `--stdout` and reports are written to `out`.
///
/// # Errors
///
/// Fails when the feature file cannot be read, parsed or written, when a
/// position lies outside it, or when the operation is declined.
pub fn run(
    cli: &Cli,
    config: &CliConfig,
    stdin: &mut impl Read,
    out: &mut impl Write,
) -> Result<()> {
    let (edit, applied) = match &cli.command {
        Command::Copy { file, from, to } => {
            let document = load(file)?;
            let ranges = block(&document, *from, *to)?;
            let copied = gherkin_grid::copy_selection(&document, &ranges)
                .wrap_err_with(|| format!("cannot copy {from}..{to}"))?;
            writeln!(out, "{copied}").wrap_err("failed to write copied cells")?;
            return Ok(());
        }
        Command::Shift { edit, at, direction } => {
            let document = load(&edit.file)?;
            let offset = offset(&document, *at)?;
            let outcome = gherkin_grid::shift_at(&document, offset, *direction)
                .wrap_err_with(|| format!("cannot shift {direction} at {at}"))?;
            (edit, finish(&document, outcome)?)
        }
        Command::Paste { edit, at, input } => {
            let clipboard = match input {
                Some(path) => fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut text = String::new();
                    stdin
                        .read_to_string(&mut text)
                        .wrap_err("failed to read pasted text from stdin")?;
                    text
                }
            };
            let document = load(&edit.file)?;
            let offset = offset(&document, *at)?;
            let outcome = gherkin_grid::paste_at(&document, offset, &clipboard)
                .wrap_err_with(|| format!("cannot paste at {at}"))?;
            (edit, finish(&document, outcome)?)
        }
        Command::Clear { edit, from, to } => {
            let document = load(&edit.file)?;
            let ranges = block(&document, *from, *to)?;
            let outcome = gherkin_grid::clear_selection(&document, &ranges)
                .wrap_err_with(|| format!("cannot clear {from}..{to}"))?;
            (edit, finish(&document, outcome)?)
        }
        Command::InsertColumn { edit, at } => {
            let document = load(&edit.file)?;
            let offset = offset(&document, *at)?;
            let outcome = gherkin_grid::insert_column_at(&document, offset)
                .wrap_err_with(|| format!("cannot insert a column at {at}"))?;
            (edit, finish(&document, outcome)?)
        }
        Command::InsertRow { edit, at } => {
            let document = load(&edit.file)?;
            let offset = offset(&document, *at)?;
            let outcome = gherkin_grid::insert_row_after(&document, offset)
                .wrap_err_with(|| format!("cannot insert a row at {at}"))?;
            (edit, finish(&document, outcome)?)
        }
    };

    write_document(edit, &applied.text, out)?;
    if config.report == ReportFormat::Json {
        let report = serde_json::to_string(&applied.outcome).wrap_err("failed to encode report")?;
        writeln!(out, "{report}").wrap_err("failed to write report")?;
    }
    Ok(())
}

/// An applied edit together with the document text it produced.
struct Applied {
    outcome: EditOutcome,
    text: String,
}

fn finish(document: &FeatureDocument, outcome: EditOutcome) -> Result<Applied> {
    let text = outcome
        .edit
        .apply(document.text())
        .wrap_err("failed to apply edit")?;
    info!(
        start = outcome.edit.range.start,
        end = outcome.edit.range.end,
        caret = outcome.caret,
        "applied table edit"
    );
    Ok(Applied { outcome, text })
}

fn load(path: &Path) -> Result<FeatureDocument> {
    load_feature_file(path).wrap_err_with(|| format!("failed to load {}", path.display()))
}

fn offset(document: &FeatureDocument, at: Position) -> Result<usize> {
    Ok(document.offset_at(at.line, at.column)?)
}

/// The column-mode selection spanned by two opposite corners.
fn block(document: &FeatureDocument, from: Position, to: Position) -> Result<Vec<TextRange>> {
    let lines = from.line.min(to.line)..=from.line.max(to.line);
    let columns = from.column.min(to.column)..=from.column.max(to.column);
    Ok(document.block_ranges(lines, columns)?)
}

fn write_document(edit: &EditArgs, text: &str, out: &mut impl Write) -> Result<()> {
    if edit.stdout {
        out.write_all(text.as_bytes())
            .wrap_err("failed to write edited document")?;
    } else {
        fs::write(&edit.file, text)
            .wrap_err_with(|| format!("failed to write {}", edit.file.display()))?;
    }
    Ok(())
}
