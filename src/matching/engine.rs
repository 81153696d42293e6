use std::time::Instant;

use thiserror::Error;

use crate::catalog::index::ReferenceIndex;
use crate::core::record::{Dataset, Record};
use crate::core::types::RiskTier;
use crate::matching::progress::{is_checkpoint, percent_complete, ProgressReporter};
use crate::matching::scoring::{score_normalized, IntersectionRule, NormalizedName};
use crate::utils::validation::round_score;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatchError {
    #[error("{role} column '{column}' not found in dataset")]
    UnknownColumn { role: &'static str, column: String },

    #[error("Matching cancelled after {completed} of {total} records")]
    Cancelled { completed: usize, total: usize },
}

/// Immutable configuration of one matching run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingConfig {
    /// Column holding the customer names to screen
    pub customer_column: String,
    /// Column holding the restricted-party names
    pub reference_column: String,
    /// How shared bigrams are counted
    pub intersection: IntersectionRule,
}

impl MatchingConfig {
    pub fn new(customer_column: impl Into<String>, reference_column: impl Into<String>) -> Self {
        Self {
            customer_column: customer_column.into(),
            reference_column: reference_column.into(),
            intersection: IntersectionRule::default(),
        }
    }

    #[must_use]
    pub fn with_intersection(mut self, intersection: IntersectionRule) -> Self {
        self.intersection = intersection;
        self
    }
}

/// Best reference match for one input record
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    /// The originating record (borrowed, never copied)
    pub record: &'a Record,

    /// Customer name as read from the record; "" when blank
    pub customer_name: String,

    /// Best matching reference name; "" when nothing scored above zero
    pub matched_reference: String,

    /// Similarity in [0, 1], rounded to 4 decimal places
    pub similarity: f64,
}

impl MatchResult<'_> {
    #[must_use]
    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_score(self.similarity)
    }

    #[must_use]
    pub fn has_match(&self) -> bool {
        !self.matched_reference.is_empty()
    }
}

/// Scans records against a [`ReferenceIndex`]
pub struct MatchingEngine<'a> {
    index: &'a ReferenceIndex,
    intersection: IntersectionRule,
}

impl<'a> MatchingEngine<'a> {
    /// Create an engine using the default intersection rule
    pub fn new(index: &'a ReferenceIndex) -> Self {
        Self {
            index,
            intersection: IntersectionRule::default(),
        }
    }

    pub fn with_intersection(index: &'a ReferenceIndex, intersection: IntersectionRule) -> Self {
        Self {
            index,
            intersection,
        }
    }

    /// Best reference name and its unrounded score for one customer name.
    ///
    /// Scans in index order, keeps the first entry with the strictly highest
    /// score and stops as soon as a perfect score is seen. Returns `("", 0.0)`
    /// for blank names, for names with nothing left after normalization
    /// (such as "Co."), or when nothing scores above zero.
    #[must_use]
    pub fn best_match(&self, customer: &str) -> (&'a str, f64) {
        let mut best_name = "";
        let mut best_score = 0.0;

        if customer.trim().is_empty() {
            return (best_name, best_score);
        }

        let query = NormalizedName::new(customer);
        if query.text.is_empty() {
            return (best_name, best_score);
        }

        for entry in self.index.iter() {
            let score = score_normalized(&query, &entry.normalized, self.intersection);
            if score > best_score {
                best_score = score;
                best_name = entry.original.as_str();
            }
            if best_score >= 1.0 {
                break;
            }
        }

        (best_name, best_score)
    }

    /// Match a single record on `customer_column`
    #[must_use]
    pub fn match_record<'r>(&self, record: &'r Record, customer_column: &str) -> MatchResult<'r> {
        let customer = record.text(customer_column);

        if customer.trim().is_empty() {
            return MatchResult {
                record,
                customer_name: String::new(),
                matched_reference: String::new(),
                similarity: 0.0,
            };
        }

        let (matched, score) = self.best_match(&customer);
        MatchResult {
            record,
            customer_name: customer,
            matched_reference: matched.to_string(),
            similarity: round_score(score),
        }
    }

    /// Match every record, in order, reporting progress at each checkpoint.
    ///
    /// Produces exactly one result per record. If the reporter asks to cancel
    /// at a checkpoint, the partial results are discarded and
    /// [`MatchError::Cancelled`] is returned.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::Cancelled` if the reporter cancels the run.
    pub fn match_all<'r, P>(
        &self,
        records: &'r [Record],
        customer_column: &str,
        reporter: &mut P,
    ) -> Result<Vec<MatchResult<'r>>, MatchError>
    where
        P: ProgressReporter + ?Sized,
    {
        let total = records.len();
        let started = Instant::now();
        let mut results = Vec::with_capacity(total);

        for (i, record) in records.iter().enumerate() {
            results.push(self.match_record(record, customer_column));

            if is_checkpoint(i, total) {
                reporter.report(percent_complete(i, total));
                if reporter.is_cancelled() {
                    tracing::info!(completed = i + 1, total, "matching run cancelled");
                    return Err(MatchError::Cancelled {
                        completed: i + 1,
                        total,
                    });
                }
            }
        }

        tracing::info!(
            records = total,
            references = self.index.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "matching run complete"
        );

        Ok(results)
    }
}

/// Match `rows` against the reference names found in the same rows.
///
/// The reference index is built from `config.reference_column` of `rows`;
/// records are matched on `config.customer_column`. Missing cells read as "".
///
/// # Errors
///
/// Returns `MatchError::Cancelled` if the reporter cancels the run.
pub fn run<'r, P>(
    rows: &'r [Record],
    config: &MatchingConfig,
    reporter: &mut P,
) -> Result<Vec<MatchResult<'r>>, MatchError>
where
    P: ProgressReporter + ?Sized,
{
    let index = ReferenceIndex::from_records(rows, &config.reference_column);
    MatchingEngine::with_intersection(&index, config.intersection).match_all(
        rows,
        &config.customer_column,
        reporter,
    )
}

/// Match a dataset, optionally taking the reference names from a second dataset.
///
/// Both configured columns must exist in the dataset they are read from.
///
/// # Errors
///
/// Returns `MatchError::UnknownColumn` for a missing column, or
/// `MatchError::Cancelled` if the reporter cancels the run.
pub fn run_dataset<'r, P>(
    dataset: &'r Dataset,
    references: Option<&Dataset>,
    config: &MatchingConfig,
    reporter: &mut P,
) -> Result<Vec<MatchResult<'r>>, MatchError>
where
    P: ProgressReporter + ?Sized,
{
    if !dataset.has_column(&config.customer_column) {
        return Err(MatchError::UnknownColumn {
            role: "Customer",
            column: config.customer_column.clone(),
        });
    }

    let reference_source = references.unwrap_or(dataset);
    if !reference_source.has_column(&config.reference_column) {
        return Err(MatchError::UnknownColumn {
            role: "Reference",
            column: config.reference_column.clone(),
        });
    }

    let index = ReferenceIndex::from_records(&reference_source.rows, &config.reference_column);
    tracing::debug!(
        records = dataset.len(),
        references = index.len(),
        "starting matching run"
    );

    MatchingEngine::with_intersection(&index, config.intersection).match_all(
        &dataset.rows,
        &config.customer_column,
        reporter,
    )
}

/// Results scoring at or above `threshold`, in their original order
#[must_use]
pub fn filter_by_threshold<'a, 'r>(
    results: &'a [MatchResult<'r>],
    threshold: f64,
) -> Vec<&'a MatchResult<'r>> {
    results.iter().filter(|r| r.similarity >= threshold).collect()
}

/// Stable sort of a result view by descending similarity
pub fn sort_by_score(view: &mut [&MatchResult<'_>]) {
    view.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Tier counts over a complete result sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub matched: usize,
    pub critical: usize,
    pub high: usize,
    pub low: usize,
}

impl RunSummary {
    #[must_use]
    pub fn from_results(results: &[MatchResult<'_>]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            if result.has_match() {
                summary.matched += 1;
            }
            match result.risk_tier() {
                RiskTier::Critical => summary.critical += 1,
                RiskTier::High => summary.high += 1,
                RiskTier::Low => summary.low += 1,
            }
        }
        summary
    }
}
