//! Shared helpers for input validation and score formatting.

pub mod validation;
