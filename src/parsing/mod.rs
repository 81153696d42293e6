//! Importers that turn customer and reference files into a [`Dataset`].
//!
//! This module provides parsers for:
//!
//! - **Spreadsheets** (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`): first sheet only
//! - **Delimited text** (`.csv`, `.tsv`, `.txt`)
//!
//! In every format the first row names the columns and each following row
//! becomes one [`Record`](crate::core::record::Record). Blank header cells are
//! named `Column1`, `Column2`, ... by position.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rpl_screen::parsing::load_dataset;
//! use std::path::Path;
//!
//! let dataset = load_dataset(Path::new("customers.xlsx"), None).unwrap();
//! println!("{} rows, columns: {:?}", dataset.len(), dataset.headers);
//! ```

pub mod delimited;
pub mod spreadsheet;

use std::path::Path;

use thiserror::Error;

use crate::core::record::Dataset;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse delimited file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("File has no header row")]
    MissingHeader,

    #[error("Too many rows: {0} exceeds the maximum")]
    TooManyRows(usize),
}

/// Supported input formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Xlsx,
    Xls,
    Ods,
    Csv,
    Tsv,
}

/// Detect input format from file extension
#[must_use]
pub fn detect_format(path: &Path) -> InputFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("xlsx" | "xlsm" | "xlsb") => InputFormat::Xlsx,
        Some("xls") => InputFormat::Xls,
        Some("ods") => InputFormat::Ods,
        Some("tsv" | "tab") => InputFormat::Tsv,
        _ => InputFormat::Csv, // Default to CSV for unknown extensions
    }
}

/// Load a dataset, auto-detecting the format unless one is given
///
/// # Errors
///
/// Returns `ParseError` if the file cannot be read, has no header row, or
/// exceeds the row limit.
pub fn load_dataset(path: &Path, format: Option<InputFormat>) -> Result<Dataset, ParseError> {
    let format = format.unwrap_or_else(|| detect_format(path));

    let dataset = match format {
        InputFormat::Xlsx | InputFormat::Xls | InputFormat::Ods => {
            spreadsheet::parse_spreadsheet_file(path)?
        }
        InputFormat::Csv => delimited::parse_delimited_file(path, b',')?,
        InputFormat::Tsv => delimited::parse_delimited_file(path, b'\t')?,
    };

    tracing::debug!(
        path = %path.display(),
        ?format,
        rows = dataset.len(),
        columns = dataset.headers.len(),
        "loaded dataset"
    );

    Ok(dataset.with_source(path.display().to_string()))
}

/// Column names for a header row; blank cells get positional names
pub(crate) fn header_names<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell.as_ref().trim_start_matches('\u{feff}');
            if name.trim().is_empty() {
                format!("Column{}", i + 1)
            } else {
                name.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("list.XLSX")), InputFormat::Xlsx);
        assert_eq!(detect_format(Path::new("list.xls")), InputFormat::Xls);
        assert_eq!(detect_format(Path::new("list.ods")), InputFormat::Ods);
        assert_eq!(detect_format(Path::new("list.tsv")), InputFormat::Tsv);
        assert_eq!(detect_format(Path::new("list.csv")), InputFormat::Csv);
        assert_eq!(detect_format(Path::new("list")), InputFormat::Csv);
    }

    #[test]
    fn test_header_names() {
        assert_eq!(
            header_names(["\u{feff}Customer", "", "RPL", "  "]),
            vec!["Customer", "Column2", "RPL", "Column4"]
        );
    }
}
