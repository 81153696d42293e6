use once_cell::sync::Lazy;
use regex::Regex;

/// Legal-form and business words dropped from names before comparison
pub const BUSINESS_SUFFIXES: &[&str] = &[
    "co",
    "ltd",
    "inc",
    "corp",
    "corporation",
    "limited",
    "technology",
    "tech",
    "group",
    "int",
    "international",
    "trade",
    "llc",
    "plc",
];

/// Words ignored when looking for words two names share
pub const STOPWORDS: &[&str] = &[
    "ltd", "co", "inc", "corp", "limited", "llc", "plc", "and", "the",
];

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("invalid WHITESPACE_RE"));

static SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"(?i)\b(?:{})\b", BUSINESS_SUFFIXES.join("|"));
    Regex::new(&pattern).expect("invalid SUFFIX_RE")
});

/// Punctuation removed from names: `` . , / # ! $ % ^ & * ; : { } = - _ ` ~ ( ) ``
#[inline]
#[must_use]
pub fn is_stripped_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | '/'
            | '#'
            | '!'
            | '$'
            | '%'
            | '^'
            | '&'
            | '*'
            | ';'
            | ':'
            | '{'
            | '}'
            | '='
            | '-'
            | '_'
            | '`'
            | '~'
            | '('
            | ')'
    )
}

fn lowercase_without_punctuation(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|&c| !is_stripped_punctuation(c))
        .collect()
}

/// Canonicalize a name for comparison.
///
/// Lowercases, strips punctuation, collapses whitespace, removes every
/// business-suffix word wherever it appears, then trims. Removing a word can
/// leave a double space behind, so whitespace is collapsed again afterwards;
/// this keeps `normalize(normalize(x)) == normalize(x)`.
///
/// # Examples
///
/// ```
/// use rpl_screen::matching::normalize::normalize;
///
/// assert_eq!(normalize("ACME Corporation"), "acme");
/// assert_eq!(normalize("Zenith Trading Co."), "zenith trading");
/// assert_eq!(normalize("Global Tech Holdings Group Ltd"), "global holdings");
/// ```
#[must_use]
pub fn normalize(s: &str) -> String {
    let stripped = lowercase_without_punctuation(s);
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    let without_suffixes = SUFFIX_RE.replace_all(&collapsed, "");
    WHITESPACE_RE
        .replace_all(&without_suffixes, " ")
        .trim()
        .to_string()
}

/// Split a name into comparable words.
///
/// Words of one character and [`STOPWORDS`] are dropped. Order and duplicates
/// are preserved.
#[must_use]
pub fn tokenize(s: &str) -> Vec<String> {
    lowercase_without_punctuation(s)
        .split_whitespace()
        .filter(|w| w.chars().count() > 1 && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}
