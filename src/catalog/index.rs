use std::collections::HashSet;

use crate::core::record::Record;
use crate::matching::scoring::NormalizedName;

/// One distinct restricted-party name, normalized once at index build time
#[derive(Debug, Clone)]
pub struct ReferenceEntry {
    /// The name exactly as it appeared in the reference column
    pub original: String,

    /// Normalized form used for scoring
    pub normalized: NormalizedName,
}

impl ReferenceEntry {
    #[must_use]
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let normalized = NormalizedName::new(&original);
        Self {
            original,
            normalized,
        }
    }
}

/// Deduplicated restricted-party names in first-seen order.
///
/// The order is the scan order of the matching engine and therefore the
/// tie-break: among equally scoring entries the earliest one wins. The index is
/// read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceIndex {
    /// Build from raw names, dropping empty strings and exact duplicates
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();

        for name in names {
            let name = name.into();
            if name.is_empty() || seen.contains(&name) {
                continue;
            }
            seen.insert(name.clone());
            entries.push(ReferenceEntry::new(name));
        }

        tracing::debug!(unique = entries.len(), "built reference index");
        Self { entries }
    }

    /// Build from the `column` of every record
    #[must_use]
    pub fn from_records(records: &[Record], column: &str) -> Self {
        Self::from_names(records.iter().map(|r| r.text(column)))
    }

    #[must_use]
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let index = ReferenceIndex::from_names(["Beta", "Alpha", "Beta", "", "Gamma", "Alpha"]);
        let names: Vec<&str> = index.iter().map(|e| e.original.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Gamma"]);
    }

    #[test]
    fn test_dedup_is_exact_not_normalized() {
        // Same normalized form, different originals: both kept
        let index = ReferenceIndex::from_names(["Acme Corp", "ACME CORPORATION"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.entries()[0].normalized.text, "acme");
        assert_eq!(index.entries()[1].normalized.text, "acme");
    }

    #[test]
    fn test_from_records_skips_missing() {
        let records = vec![
            [("RPL", "Acme Corp")].into_iter().collect::<Record>(),
            Record::new(),
            [("RPL", "")].into_iter().collect::<Record>(),
            [("RPL", "Zenith Trade")].into_iter().collect::<Record>(),
        ];
        let index = ReferenceIndex::from_records(&records, "RPL");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty_index() {
        let index = ReferenceIndex::from_names(Vec::<String>::new());
        assert!(index.is_empty());
    }
}
