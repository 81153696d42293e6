//! Centralized validation and helper functions.

/// Maximum number of data rows accepted from a single file (DOS protection)
pub const MAX_ROWS: usize = 1_000_000;

/// Similarity scores are reported with this many decimal places
pub const SCORE_DECIMAL_PLACES: i32 = 4;

/// Round a similarity score to [`SCORE_DECIMAL_PLACES`] places, halves away from zero.
///
/// # Examples
///
/// ```
/// use rpl_screen::utils::validation::round_score;
///
/// assert_eq!(round_score(0.555_555), 0.5556);
/// assert_eq!(round_score(1.0), 1.0);
/// ```
#[must_use]
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMAL_PLACES);
    (score * factor).round() / factor
}

/// Check if adding another row would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new row.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_row_limit(count: usize) -> Option<String> {
    if count >= MAX_ROWS {
        Some(format!(
            "Too many rows: adding another would exceed maximum of {MAX_ROWS}"
        ))
    } else {
        None
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Threshold must be between 0 and 1, got {0}")]
    ThresholdOutOfRange(f64),
}

/// Validate a display threshold, which must lie in [0, 1]
///
/// # Errors
///
/// Returns `ValidationError::ThresholdOutOfRange` for NaN or values outside [0, 1].
pub fn validate_threshold(threshold: f64) -> Result<f64, ValidationError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ValidationError::ThresholdOutOfRange(threshold))
    }
}

/// Parse and validate a threshold from the command line
///
/// # Errors
///
/// Returns a message when the value is not a number in [0, 1].
pub fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    validate_threshold(value).map_err(|e| e.to_string())
}
