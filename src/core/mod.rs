//! Core data types for restricted-party screening.
//!
//! - [`Record`], [`CellValue`], [`Dataset`]: open-ended rows imported from a file
//! - [`RiskTier`]: canonical classification of a match score
//! - [`DisplaySeverity`]: cosmetic severity for text output only
//! - [`detect_columns`]: guesses the customer and reference columns from headers
//!
//! ## Risk tiers
//!
//! | Score        | Tier     |
//! |--------------|----------|
//! | > 0.85       | CRITICAL |
//! | > 0.65       | HIGH     |
//! | otherwise    | LOW      |
//!
//! [`Record`]: record::Record
//! [`CellValue`]: record::CellValue
//! [`Dataset`]: record::Dataset
//! [`RiskTier`]: types::RiskTier
//! [`DisplaySeverity`]: types::DisplaySeverity
//! [`detect_columns`]: columns::detect_columns

pub mod columns;
pub mod record;
pub mod types;
