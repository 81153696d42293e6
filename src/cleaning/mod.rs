//! Optional name cleaning before a matching run.
//!
//! A [`NameCleaner`] rewrites a batch of names (for example, an external service
//! that strips noise from business names). Cleaning is strictly best effort:
//! [`clean_names_fail_open`] substitutes the original names for any batch whose
//! cleaning fails, times out, or returns the wrong number of names, so a broken
//! cleaner can never abort or corrupt the run that follows.
//!
//! [`IdentityCleaner`] is the offline default. [`clean_column`] writes the
//! cleaned names to [`CLEANED_NAME_COLUMN`] and leaves the source column as read.

pub mod remote;

use std::time::Duration;

use thiserror::Error;

use crate::core::record::Dataset;

pub use remote::HttpNameCleaner;

/// Column added to the dataset to hold cleaned customer names
pub const CLEANED_NAME_COLUMN: &str = "CLEANED_CUSTOMER_NAME";

/// Default number of names sent per cleaning request
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default bound on a single cleaning request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Cleaning request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Cleaning request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed cleaning response: {0}")]
    Malformed(String),

    #[error("Cleaner configuration error: {0}")]
    Config(String),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Rewrites a batch of names, one output per input, in the same order
pub trait NameCleaner {
    /// # Errors
    ///
    /// Implementations return `CleanerError` on any failure; callers treat every
    /// error as "keep the original names".
    fn clean(&self, names: &[String]) -> Result<Vec<String>, CleanerError>;
}

/// Returns names unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCleaner;

impl NameCleaner for IdentityCleaner {
    fn clean(&self, names: &[String]) -> Result<Vec<String>, CleanerError> {
        Ok(names.to_vec())
    }
}

/// Clean `names` in batches, keeping the original batch whenever cleaning fails.
///
/// The output always has exactly `names.len()` entries in the input order.
/// Blank names are passed through and never sent to the cleaner.
pub fn clean_names_fail_open<C>(cleaner: &C, names: &[String], batch_size: usize) -> Vec<String>
where
    C: NameCleaner + ?Sized,
{
    let mut output = names.to_vec();
    let pending: Vec<usize> = names
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.trim().is_empty())
        .map(|(i, _)| i)
        .collect();

    for chunk in pending.chunks(batch_size.max(1)) {
        let batch: Vec<String> = chunk.iter().map(|&i| names[i].clone()).collect();

        match cleaner.clean(&batch) {
            Ok(cleaned) if cleaned.len() == batch.len() => {
                for (&i, name) in chunk.iter().zip(cleaned) {
                    output[i] = name;
                }
            }
            Ok(cleaned) => {
                tracing::warn!(
                    expected = batch.len(),
                    received = cleaned.len(),
                    "Name cleaner returned the wrong number of names; using original names"
                );
            }
            Err(e) => {
                tracing::warn!("Name cleaning failed, using original names: {e}");
            }
        }
    }

    output
}

/// Copy of `dataset` with the cleaned names of `column` in [`CLEANED_NAME_COLUMN`].
///
/// Fails open like [`clean_names_fail_open`]: rows whose batch could not be
/// cleaned carry their original name.
pub fn clean_column<C>(cleaner: &C, dataset: &Dataset, column: &str, batch_size: usize) -> Dataset
where
    C: NameCleaner + ?Sized,
{
    let names = dataset.column_text(column);
    let cleaned = clean_names_fail_open(cleaner, &names, batch_size);
    dataset.with_column(CLEANED_NAME_COLUMN, &cleaned)
}
