//! Name matching engine and scoring algorithms.
//!
//! This module provides the core screening functionality:
//!
//! - [`normalize`](normalize::normalize): canonical form of a name for comparison
//! - [`similarity`](scoring::similarity): bigram (Dice-style) similarity of two names
//! - [`common_words`](scoring::common_words): shared words, for explaining a match
//! - [`MatchingEngine`](engine::MatchingEngine): best reference match for every record
//! - [`ProgressReporter`](progress::ProgressReporter): checkpoints and cancellation
//!
//! ## Matching Algorithm
//!
//! For every input record, in order:
//!
//! 1. Read the customer name; blank names produce an empty, zero-score result
//! 2. Normalize the name once and compute its bigrams
//! 3. Scan the reference index in first-seen order, keeping the strictly best score
//! 4. Stop early on a perfect score
//! 5. Round the best score to 4 decimal places
//!
//! ## Scoring
//!
//! `score = 2 * shared / (|bigrams(a)| + |bigrams(b)|)`
//!
//! By default a bigram of `a` is "shared" whenever `b` contains it at all,
//! without capping repeats by their count in `b`. The textbook multiset rule is
//! available as [`IntersectionRule::Multiset`](scoring::IntersectionRule::Multiset).
//!
//! ## Example
//!
//! ```rust
//! use rpl_screen::core::record::Record;
//! use rpl_screen::matching::engine::{run, MatchingConfig};
//! use rpl_screen::matching::progress::NoProgress;
//!
//! let rows: Vec<Record> = vec![
//!     [("Customer", "Acme Corp"), ("RPL", "ACME CORPORATION")].into_iter().collect(),
//!     [("Customer", "Zenith Trading Co"), ("RPL", "Zenith Trade")].into_iter().collect(),
//! ];
//!
//! let config = MatchingConfig::new("Customer", "RPL");
//! let results = run(&rows, &config, &mut NoProgress).unwrap();
//!
//! for r in &results {
//!     println!("{} -> {} ({:.4}, {})",
//!         r.customer_name, r.matched_reference, r.similarity, r.risk_tier());
//! }
//! ```

pub mod engine;
pub mod normalize;
pub mod progress;
pub mod scoring;
