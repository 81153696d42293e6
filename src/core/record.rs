use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single scalar cell from an imported dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Build a text cell, treating the empty string as a missing value
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s)
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Coerce the cell to a string. Missing values become the empty string.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Integral values print without a fractional part, the way spreadsheets show them
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = n as i64;
        whole.to_string()
    } else {
        n.to_string()
    }
}

/// One input row: an open-ended mapping of column name to cell value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: HashMap<String, CellValue>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.values.insert(column.into(), value);
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    /// Value of `column` as a string; absent columns read as ""
    #[must_use]
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(CellValue::as_text).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, CellValue::text(v));
        }
        record
    }
}

/// An imported table: ordered headers plus one `Record` per data row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Source file path (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Column names in file order
    pub headers: Vec<String>,

    /// Data rows in file order
    pub rows: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Self {
        Self {
            source: None,
            headers,
            rows,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// All values of `column` coerced to strings, in row order
    #[must_use]
    pub fn column_text(&self, column: &str) -> Vec<String> {
        self.rows.iter().map(|r| r.text(column)).collect()
    }

    /// Copy of the dataset with `column` set row by row from `values`.
    ///
    /// The column is appended to the headers if it is not already present.
    /// Rows beyond the end of `values` keep their original cell.
    #[must_use]
    pub fn with_column(&self, column: &str, values: &[String]) -> Self {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut row = row.clone();
                if let Some(v) = values.get(i) {
                    row.insert(column, CellValue::text(v.clone()));
                }
                row
            })
            .collect();

        let mut headers = self.headers.clone();
        if !self.has_column(column) {
            headers.push(column.to_string());
        }

        Self {
            source: self.source.clone(),
            headers,
            rows,
        }
    }
}
