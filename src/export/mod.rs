//! Full-report export of a screening run.
//!
//! Every input row is written, unfiltered and in input order, with all of its
//! original columns followed by three result columns:
//!
//! | Column | Content |
//! |--------|---------|
//! | `MATCHED_RPL_NAME` | Best matching reference name, or empty |
//! | `MATCH_SIMILARITY` | Similarity rounded to 4 decimal places |
//! | `RISK_LEVEL` | `CRITICAL`, `HIGH` or `LOW` |
//!
//! The output format follows the file extension: `.xlsx`, `.csv`, `.tsv` or
//! `.json`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::core::record::CellValue;
use crate::matching::engine::{MatchResult, RunSummary};

/// Worksheet name used for XLSX reports
pub const RESULTS_SHEET_NAME: &str = "Fuzzy Results Full";

pub const MATCHED_NAME_COLUMN: &str = "MATCHED_RPL_NAME";
pub const SIMILARITY_COLUMN: &str = "MATCH_SIMILARITY";
pub const RISK_LEVEL_COLUMN: &str = "RISK_LEVEL";

const RESULT_COLUMNS: [&str; 3] = [MATCHED_NAME_COLUMN, SIMILARITY_COLUMN, RISK_LEVEL_COLUMN];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write delimited report: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write XLSX report: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("Failed to write JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported report extension '{0}' (expected xlsx, csv, tsv or json)")]
    UnsupportedExtension(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    /// Pick the report format from the output file extension
    ///
    /// # Errors
    ///
    /// Returns `ExportError::UnsupportedExtension` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            _ => Err(ExportError::UnsupportedExtension(ext)),
        }
    }
}

/// Report column order: input headers (minus any clashing result column), then the result columns
#[must_use]
pub fn report_headers(input_headers: &[String]) -> Vec<String> {
    input_headers
        .iter()
        .filter(|h| !RESULT_COLUMNS.contains(&h.as_str()))
        .cloned()
        .chain(RESULT_COLUMNS.iter().map(|c| (*c).to_string()))
        .collect()
}

/// Write the full report to `path`, choosing the format by extension.
///
/// # Errors
///
/// Returns `ExportError` for an unsupported extension or any write failure.
pub fn write_report(
    path: &Path,
    input_headers: &[String],
    results: &[MatchResult<'_>],
) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;

    match format {
        ExportFormat::Xlsx => write_xlsx(path, input_headers, results)?,
        ExportFormat::Csv => write_delimited(path, input_headers, results, b',')?,
        ExportFormat::Tsv => write_delimited(path, input_headers, results, b'\t')?,
        ExportFormat::Json => write_json(path, input_headers, results)?,
    }

    tracing::info!(path = %path.display(), rows = results.len(), ?format, "wrote report");
    Ok(format)
}

/// Cells of one report row, in [`report_headers`] order
fn report_row(columns: &[String], result: &MatchResult<'_>) -> Vec<CellValue> {
    columns
        .iter()
        .map(|column| match column.as_str() {
            MATCHED_NAME_COLUMN => CellValue::text(result.matched_reference.clone()),
            SIMILARITY_COLUMN => CellValue::Number(result.similarity),
            RISK_LEVEL_COLUMN => CellValue::text(result.risk_tier().as_str()),
            _ => result.record.get(column).cloned().unwrap_or(CellValue::Empty),
        })
        .collect()
}

fn write_xlsx(
    path: &Path,
    input_headers: &[String],
    results: &[MatchResult<'_>],
) -> Result<(), ExportError> {
    let columns = report_headers(input_headers);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name(RESULTS_SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, xlsx_col(col), name, &header_format)?;
    }

    for (i, result) in results.iter().enumerate() {
        let row = xlsx_row(i + 1);
        for (col, cell) in report_row(&columns, result).into_iter().enumerate() {
            let col = xlsx_col(col);
            match cell {
                CellValue::Empty => {}
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row, col, b)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row, col, n)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn xlsx_row(index: usize) -> u32 {
    index as u32
}

#[allow(clippy::cast_possible_truncation)]
fn xlsx_col(index: usize) -> u16 {
    index as u16
}

fn write_delimited(
    path: &Path,
    input_headers: &[String],
    results: &[MatchResult<'_>],
    delimiter: u8,
) -> Result<(), ExportError> {
    let columns = report_headers(input_headers);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    writer.write_record(&columns)?;
    for result in results {
        writer.write_record(report_row(&columns, result).iter().map(CellValue::as_text))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(
    path: &Path,
    input_headers: &[String],
    results: &[MatchResult<'_>],
) -> Result<(), ExportError> {
    let columns = report_headers(input_headers);

    // serde_json is built with `preserve_order`, so keys follow `columns`
    let rows: Vec<Value> = results
        .iter()
        .map(|result| {
            let row: Map<String, Value> = columns
                .iter()
                .cloned()
                .zip(report_row(&columns, result).into_iter().map(cell_json))
                .collect();
            Value::Object(row)
        })
        .collect();

    let report = json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "sheet": RESULTS_SHEET_NAME,
        "columns": columns,
        "summary": RunSummary::from_results(results),
        "rows": rows,
    });

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

fn cell_json(cell: CellValue) -> Value {
    match cell {
        CellValue::Empty => Value::Null,
        CellValue::Bool(b) => Value::Bool(b),
        CellValue::Number(n) => json!(n),
        CellValue::Text(s) => Value::String(s),
    }
}
