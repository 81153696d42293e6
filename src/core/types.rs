use serde::{Deserialize, Serialize};

/// Scores above this are `RiskTier::Critical`
pub const CRITICAL_THRESHOLD: f64 = 0.85;

/// Scores above this (and not critical) are `RiskTier::High`
pub const HIGH_THRESHOLD: f64 = 0.65;

/// Canonical risk classification of a match score.
///
/// This is the tier written to exported reports and used for any decision
/// about a match. See [`DisplaySeverity`] for the cosmetic variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    High,
    Critical,
}

impl RiskTier {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > CRITICAL_THRESHOLD {
            Self::Critical
        } else if score > HIGH_THRESHOLD {
            Self::High
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a similarity score into its canonical risk tier
#[must_use]
pub fn classify(score: f64) -> RiskTier {
    RiskTier::from_score(score)
}

/// Presentation-only severity used to decorate scores in text output.
///
/// Uses looser cutoffs (0.80 / 0.50) than [`RiskTier`]. Never use it to decide
/// anything about a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplaySeverity {
    Clear,
    Elevated,
    Severe,
}

impl DisplaySeverity {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            Self::Severe
        } else if score > 0.5 {
            Self::Elevated
        } else {
            Self::Clear
        }
    }

    /// Short marker printed next to a score
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Clear => "  ",
            Self::Elevated => "! ",
            Self::Severe => "!!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(0.90), RiskTier::Critical);
        assert_eq!(classify(0.70), RiskTier::High);
        assert_eq!(classify(0.30), RiskTier::Low);
    }

    #[test]
    fn test_classify_boundaries_are_exclusive() {
        assert_eq!(classify(0.85), RiskTier::High);
        assert_eq!(classify(0.65), RiskTier::Low);
        assert_eq!(classify(1.0), RiskTier::Critical);
        assert_eq!(classify(0.0), RiskTier::Low);
    }

    #[test]
    fn test_display_severity_differs_from_risk_tier() {
        // 0.82 is severe for display but only HIGH for classification
        assert_eq!(DisplaySeverity::from_score(0.82), DisplaySeverity::Severe);
        assert_eq!(classify(0.82), RiskTier::High);

        assert_eq!(DisplaySeverity::from_score(0.55), DisplaySeverity::Elevated);
        assert_eq!(classify(0.55), RiskTier::Low);
        assert_eq!(DisplaySeverity::from_score(0.5), DisplaySeverity::Clear);
    }

    #[test]
    fn test_risk_tier_labels() {
        assert_eq!(RiskTier::Critical.to_string(), "CRITICAL");
        assert_eq!(
            serde_json::to_string(&RiskTier::High).unwrap(),
            "\"HIGH\""
        );
    }
}
