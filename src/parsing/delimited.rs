use std::path::Path;

use encoding_rs::WINDOWS_1252;

use crate::core::record::{CellValue, Dataset, Record};
use crate::parsing::{header_names, ParseError};
use crate::utils::validation::check_row_limit;

/// Parse a CSV/TSV file whose first row holds the column names
///
/// Files that are not valid UTF-8 are decoded as Windows-1252, the encoding
/// Excel uses for CSV exports.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_delimited_file(path: &Path, delimiter: u8) -> Result<Dataset, ParseError> {
    let bytes = std::fs::read(path)?;
    let content = decode_text(bytes);
    parse_delimited_text(&content, delimiter)
}

/// UTF-8 if valid, otherwise Windows-1252
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            tracing::debug!(len = bytes.len(), "input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Parse CSV/TSV text whose first row holds the column names.
///
/// Rows may be shorter or longer than the header row: missing cells read as
/// empty and cells past the last header are ignored. Empty cells are stored as
/// missing values.
///
/// # Errors
///
/// Returns `ParseError::MissingHeader` for empty input, `ParseError::Csv` for
/// malformed quoting, or `ParseError::TooManyRows` if the limit is exceeded.
pub fn parse_delimited_text(text: &str, delimiter: u8) -> Result<Dataset, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header_record = records.next().ok_or(ParseError::MissingHeader)??;
    let headers = header_names(header_record.iter());

    let mut rows = Vec::new();
    for result in records {
        let fields = result?;

        // Check row limit for DOS protection
        if check_row_limit(rows.len()).is_some() {
            return Err(ParseError::TooManyRows(rows.len()));
        }

        let mut record = Record::new();
        for (i, header) in headers.iter().enumerate() {
            let value = fields.get(i).map_or(CellValue::Empty, CellValue::text);
            record.insert(header.clone(), value);
        }
        rows.push(record);
    }

    Ok(Dataset::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_text() {
        let csv = "Customer,RPL Name\nAcme Corp,ACME CORPORATION\n\"Zenith, Trading Co\",Zenith Trade\n";
        let dataset = parse_delimited_text(csv, b',').unwrap();

        assert_eq!(dataset.headers, vec!["Customer", "RPL Name"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[1].text("Customer"), "Zenith, Trading Co");
        assert_eq!(dataset.rows[1].text("RPL Name"), "Zenith Trade");
    }

    #[test]
    fn test_parse_tsv_text() {
        let tsv = "Customer\tRPL\nAcme\t\n";
        let dataset = parse_delimited_text(tsv, b'\t').unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.rows[0].get("RPL").unwrap().is_empty());
    }

    #[test]
    fn test_ragged_rows() {
        let csv = "A,B,C\n1\n1,2,3,4\n";
        let dataset = parse_delimited_text(csv, b',').unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[0].text("B"), "");
        assert_eq!(dataset.rows[1].text("C"), "3");
    }

    #[test]
    fn test_header_only() {
        let dataset = parse_delimited_text("Customer,RPL\n", b',').unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.headers.len(), 2);
    }

    #[test]
    fn test_windows_1252_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        std::fs::write(&path, b"Customer,RPL\nCaf\xe9 Zurich,Acme\n").unwrap();

        let dataset = parse_delimited_file(&path, b',').unwrap();
        assert_eq!(dataset.rows[0].text("Customer"), "Caf\u{e9} Zurich");
        assert_eq!(dataset.rows[0].text("RPL"), "Acme");
    }

    #[test]
    fn test_utf8_file_is_not_reencoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utf8.csv");
        std::fs::write(&path, "Customer\nCaf\u{e9} Z\u{fc}rich\n").unwrap();

        let dataset = parse_delimited_file(&path, b',').unwrap();
        assert_eq!(dataset.rows[0].text("Customer"), "Caf\u{e9} Z\u{fc}rich");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_delimited_text("", b','),
            Err(ParseError::MissingHeader)
        ));
    }
}
