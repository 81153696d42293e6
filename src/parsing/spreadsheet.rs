use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::core::record::{CellValue, Dataset, Record};
use crate::parsing::{header_names, ParseError};
use crate::utils::validation::check_row_limit;

/// Parse the first sheet of a workbook (xlsx, xlsm, xls, xlsb, ods).
///
/// The first row of the used range names the columns. Integer-valued numbers
/// keep their numeric type and print without a fractional part; dates are kept
/// as spreadsheet serial numbers.
///
/// # Errors
///
/// Returns `ParseError::Spreadsheet` if the workbook cannot be opened or has no
/// sheets, `ParseError::MissingHeader` for an empty first sheet, or
/// `ParseError::TooManyRows` if the limit is exceeded.
pub fn parse_spreadsheet_file(path: &Path) -> Result<Dataset, ParseError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| ParseError::Spreadsheet(format!("failed to open workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ParseError::Spreadsheet("workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ParseError::Spreadsheet(format!("failed to read sheet '{sheet_name}': {e}")))?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter.next().ok_or(ParseError::MissingHeader)?;
    let headers = header_names(header_row.iter().map(|c| cell_value(c).as_text()));

    let mut rows = Vec::new();
    for row in rows_iter {
        if check_row_limit(rows.len()).is_some() {
            return Err(ParseError::TooManyRows(rows.len()));
        }

        let mut record = Record::new();
        for (i, header) in headers.iter().enumerate() {
            let value = row.get(i).map_or(CellValue::Empty, cell_value);
            record.insert(header.clone(), value);
        }
        rows.push(record);
    }

    tracing::debug!(sheet = %sheet_name, rows = rows.len(), "read worksheet");

    Ok(Dataset::new(headers, rows))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Error(e) => CellValue::text(format!("#{e:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_parse_first_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Customer").unwrap();
        sheet.write_string(0, 2, "RPL").unwrap();
        sheet.write_string(1, 0, "Acme Corp").unwrap();
        sheet.write_number(1, 1, 42).unwrap();
        sheet.write_string(1, 2, "ACME CORPORATION").unwrap();
        sheet.write_number(2, 0, 0).unwrap();
        sheet.write_boolean(2, 1, true).unwrap();
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "Ignored").unwrap();
        workbook.save(&path).unwrap();

        let dataset = parse_spreadsheet_file(&path).unwrap();
        assert_eq!(dataset.headers, vec!["Customer", "Column2", "RPL"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[0].text("Customer"), "Acme Corp");
        assert_eq!(dataset.rows[0].text("Column2"), "42");
        assert_eq!(dataset.rows[0].text("RPL"), "ACME CORPORATION");
        assert_eq!(dataset.rows[1].text("Customer"), "0");
        assert_eq!(dataset.rows[1].text("Column2"), "true");
        assert_eq!(dataset.rows[1].text("RPL"), "");
    }

    #[test]
    fn test_unreadable_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert!(matches!(
            parse_spreadsheet_file(&path),
            Err(ParseError::Spreadsheet(_))
        ));
    }
}
