//! Restricted-party reference list indexing.
//!
//! The reference list is built once per run from a single column, either of
//! the screened dataset itself or of a separate reference file. Names are
//! deduplicated by exact string equality and kept in first-seen order, which
//! makes the scan order (and therefore tie-breaking) deterministic.
//!
//! ## Example
//!
//! ```rust
//! use rpl_screen::catalog::index::ReferenceIndex;
//!
//! let index = ReferenceIndex::from_names(["Acme Corp", "Zenith Trade", "Acme Corp"]);
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.entries()[0].normalized.text, "acme");
//! ```

pub mod index;
