//! # rpl-screen
//!
//! A library for screening customer lists against restricted-party lists.
//!
//! Export compliance teams receive customer lists and denied/restricted-party
//! lists as spreadsheets, and names rarely agree exactly: "Zenith Trading Co"
//! on one side may be "ZENITH TRADE LTD." on the other. `rpl-screen` finds, for
//! every customer, the single closest restricted-party name and grades the risk.
//!
//! ## Features
//!
//! - **Normalization**: case, punctuation and common business suffixes are ignored
//! - **Bigram similarity**: a Dice-style score in [0, 1] for every pair
//! - **Best match per customer**: full scan, first reference wins ties
//! - **Risk tiers**: `CRITICAL` above 0.85, `HIGH` above 0.65, otherwise `LOW`
//! - **Spreadsheet I/O**: XLSX/XLS/ODS/CSV/TSV import and a full XLSX/CSV/JSON report
//! - **Optional name cleaning**: an external service, never able to break a run
//!
//! ## Example
//!
//! ```rust
//! use rpl_screen::{ReferenceIndex, MatchingEngine, RiskTier};
//!
//! let index = ReferenceIndex::from_names(["ACME CORPORATION", "Zenith Trade"]);
//! let engine = MatchingEngine::new(&index);
//!
//! let (name, score) = engine.best_match("Acme Corp.");
//! assert_eq!(name, "ACME CORPORATION");
//! assert_eq!(RiskTier::from_score(score), RiskTier::Critical);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Deduplicated reference-name index
//! - [`cleaning`]: Optional fail-open name cleaning
//! - [`core`]: Records, datasets, risk tiers and column detection
//! - [`matching`]: Normalization, scoring and the matching engine
//! - [`parsing`]: Spreadsheet and delimited-file import
//! - [`export`]: Full-report export
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cleaning;
pub mod cli;
pub mod core;
pub mod export;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::index::ReferenceIndex;
pub use core::record::{CellValue, Dataset, Record};
pub use core::types::*;
pub use matching::engine::{MatchResult, MatchingConfig, MatchingEngine};
pub use matching::normalize::normalize;
pub use matching::scoring::similarity;
