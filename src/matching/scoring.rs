use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::matching::normalize::{normalize, tokenize};

/// Two adjacent characters of a normalized name
pub type Bigram = (char, char);

/// Safely convert usize to f64 for ratio calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// How bigrams of the first name are counted against the second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionRule {
    /// Every bigram of A counts if B contains that bigram at all.
    /// Repeated bigrams in A are not capped by their count in B.
    #[default]
    Membership,
    /// Textbook Dice: each bigram counts at most as often as it occurs in both.
    Multiset,
}

/// A name after normalization, with its bigrams pre-computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    /// Normalized text
    pub text: String,

    /// Bigrams in order (sliding window of 2, step 1)
    pub bigrams: Vec<Bigram>,

    /// Occurrence count of each distinct bigram
    counts: HashMap<Bigram, usize>,
}

impl NormalizedName {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self::from_normalized(normalize(raw))
    }

    /// Wrap text that has already been through [`normalize`]
    #[must_use]
    pub fn from_normalized(text: String) -> Self {
        let bigrams = bigrams(&text);
        let mut counts: HashMap<Bigram, usize> = HashMap::new();
        for bigram in &bigrams {
            *counts.entry(*bigram).or_default() += 1;
        }
        Self {
            text,
            bigrams,
            counts,
        }
    }

    /// Too short to have any bigram
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.bigrams.is_empty()
    }

    fn contains(&self, bigram: &Bigram) -> bool {
        self.counts.contains_key(bigram)
    }

    fn count(&self, bigram: &Bigram) -> usize {
        self.counts.get(bigram).copied().unwrap_or(0)
    }
}

/// Bigrams of `s` by character, in order
#[must_use]
pub fn bigrams(s: &str) -> Vec<Bigram> {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Bigram similarity of two raw names using the default [`IntersectionRule`].
///
/// Both names are normalized first. Identical normalized names score exactly
/// 1.0; otherwise a name shorter than two characters scores 0.0.
///
/// # Examples
///
/// ```
/// use rpl_screen::matching::scoring::similarity;
///
/// assert_eq!(similarity("Acme Corp", "ACME CORPORATION"), 1.0);
/// let partial = similarity("Zenith Trading Co", "Zenith Trade");
/// assert!(partial > 0.3 && partial < 0.6);
/// ```
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_with_rule(a, b, IntersectionRule::default())
}

/// Bigram similarity of two raw names using an explicit intersection rule
#[must_use]
pub fn similarity_with_rule(a: &str, b: &str, rule: IntersectionRule) -> f64 {
    score_normalized(&NormalizedName::new(a), &NormalizedName::new(b), rule)
}

/// Dice-style score of two pre-normalized names.
///
/// `2 * intersection / (|bigrams(a)| + |bigrams(b)|)`, where the intersection
/// is counted over the bigrams of `a` according to `rule`. The membership rule
/// can count past the size of the true intersection for names with repeated
/// bigrams, so the result is capped at 1.0.
#[must_use]
pub fn score_normalized(a: &NormalizedName, b: &NormalizedName, rule: IntersectionRule) -> f64 {
    if a.text == b.text {
        return 1.0;
    }
    if a.is_degenerate() || b.is_degenerate() {
        return 0.0;
    }

    let intersection = match rule {
        IntersectionRule::Membership => a.bigrams.iter().filter(|g| b.contains(g)).count(),
        IntersectionRule::Multiset => a
            .counts
            .iter()
            .map(|(g, &n)| n.min(b.count(g)))
            .sum::<usize>(),
    };

    let total = a.bigrams.len() + b.bigrams.len();
    (2.0 * count_to_f64(intersection) / count_to_f64(total)).min(1.0)
}

/// Words the two names share, in the order they appear in `a`.
///
/// Diagnostic only: explains a match to a reviewer, never affects scoring.
///
/// # Examples
///
/// ```
/// use rpl_screen::matching::scoring::common_words;
///
/// let words = common_words("The Zenith Trading Co", "Zenith Trading Ltd");
/// assert_eq!(words, vec!["zenith", "trading"]);
/// ```
#[must_use]
pub fn common_words(a: &str, b: &str) -> Vec<String> {
    let words_b: HashSet<String> = tokenize(b).into_iter().collect();
    let mut seen: HashSet<String> = HashSet::new();

    tokenize(a)
        .into_iter()
        .filter(|w| words_b.contains(w))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bigrams() {
        assert_eq!(bigrams("abc"), vec![('a', 'b'), ('b', 'c')]);
        assert!(bigrams("a").is_empty());
        assert!(bigrams("").is_empty());
        assert_eq!(bigrams("né"), vec![('n', 'é')]);
    }

    #[test]
    fn test_identical_after_normalization() {
        assert!(approx(similarity("Acme Corp", "ACME CORPORATION"), 1.0));
        assert!(approx(similarity("zenith", "Zenith Ltd."), 1.0));
    }

    #[test]
    fn test_partial_overlap() {
        // "zenith trading" (13 bigrams) vs "zenith" (5 bigrams), 5 shared
        let score = similarity("Zenith Trading Co", "Zenith Trade");
        assert!(approx(score, 10.0 / 18.0));
        assert!(score > 0.3 && score < 0.6);
    }

    #[test]
    fn test_short_names_score_zero() {
        assert!(approx(similarity("a", "ab"), 0.0));
        assert!(approx(similarity("Acme", "Co X"), 0.0));
        assert!(approx(similarity("", "Acme"), 0.0));
    }

    #[test]
    fn test_equal_short_names_score_one() {
        // Equality is checked before the length rule
        assert!(approx(similarity("Ltd", "Co"), 1.0));
        assert!(approx(similarity("x", "X"), 1.0));
    }

    #[test]
    fn test_no_overlap() {
        assert!(approx(similarity("abcd", "wxyz"), 0.0));
    }

    #[test]
    fn test_membership_rule_overcounts_repeats() {
        // "aaa" -> [aa, aa]; "aaab" -> [aa, aa, ab]
        // Membership: both "aa" of A count -> 2*2/5
        let membership = similarity_with_rule("aaa", "aaab", IntersectionRule::Membership);
        assert!(approx(membership, 0.8));

        // A's repeats are not capped by B: "aaaa" -> [aa, aa, aa] vs "ab" + "aa" once
        let capped = similarity_with_rule("aaaa", "aab", IntersectionRule::Membership);
        assert!(approx(capped, 1.0));
        let multiset = similarity_with_rule("aaaa", "aab", IntersectionRule::Multiset);
        assert!(approx(multiset, 2.0 / 5.0));
    }

    #[test]
    fn test_rules_agree_without_repeats() {
        let pairs = [
            ("Northwind Traders", "Northwind Trading"),
            ("Blue Harbor Shipping", "Blue Harbour Shipping"),
            ("Kestrel Aviation", "Kestrel Avionics"),
        ];
        for (a, b) in pairs {
            let m = similarity_with_rule(a, b, IntersectionRule::Membership);
            let d = similarity_with_rule(a, b, IntersectionRule::Multiset);
            assert!(approx(m, d), "{a} vs {b}: {m} != {d}");
        }
    }

    #[test]
    fn test_symmetry_and_bounds() {
        let names = [
            "Acme Corp",
            "Acme Holdings",
            "Zenith Trading Co",
            "Zenith Trade",
            "Kestrel Aviation",
            "Blue Harbor Shipping",
            "x",
            "",
        ];
        for a in names {
            for b in names {
                let ab = similarity(a, b);
                let ba = similarity(b, a);
                assert!((0.0..=1.0).contains(&ab), "{a} vs {b} out of range: {ab}");
                assert!(approx(ab, ba), "{a} vs {b} not symmetric: {ab} != {ba}");
            }
        }
    }

    #[test]
    fn test_self_similarity() {
        for name in ["Acme", "Zenith Trading", "Kestrel Aviation Ltd"] {
            assert!(approx(similarity(name, name), 1.0));
        }
    }

    #[test]
    fn test_common_words() {
        assert_eq!(
            common_words("Zenith Zenith Trading and Co", "zenith trading"),
            vec!["zenith", "trading"]
        );
        assert!(common_words("Acme Ltd", "Acme, Limited").contains(&"acme".to_string()));
        assert!(common_words("The Co", "The Co").is_empty());
        assert!(common_words("", "anything").is_empty());
    }
}
