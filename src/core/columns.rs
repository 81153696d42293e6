use once_cell::sync::Lazy;
use regex::Regex;

static CUSTOMER_COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)customer|client|name|entity").expect("invalid CUSTOMER_COLUMN_RE")
});

static REFERENCE_COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)rpl|restricted|denied|sanction|watch").expect("invalid REFERENCE_COLUMN_RE")
});

/// Best guesses for the customer and reference columns of a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnGuess {
    pub customer: Option<String>,
    pub reference: Option<String>,
}

/// Guess which headers hold customer names and restricted-party names.
///
/// Each guess is the first header (in file order) whose name matches the
/// corresponding keyword pattern. The two guesses are independent, so a header
/// such as "RPL Name" can satisfy both.
#[must_use]
pub fn detect_columns(headers: &[String]) -> ColumnGuess {
    ColumnGuess {
        customer: headers
            .iter()
            .find(|h| CUSTOMER_COLUMN_RE.is_match(h))
            .cloned(),
        reference: headers
            .iter()
            .find(|h| REFERENCE_COLUMN_RE.is_match(h))
            .cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_detect_typical_headers() {
        let guess = detect_columns(&headers(&["ID", "Customer Name", "Denied Party"]));
        assert_eq!(guess.customer.as_deref(), Some("Customer Name"));
        assert_eq!(guess.reference.as_deref(), Some("Denied Party"));
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        let guess = detect_columns(&headers(&["CLIENT", "sanctions_list"]));
        assert_eq!(guess.customer.as_deref(), Some("CLIENT"));
        assert_eq!(guess.reference.as_deref(), Some("sanctions_list"));
    }

    #[test]
    fn test_first_matching_header_wins() {
        let guess = detect_columns(&headers(&["RPL Name", "Customer"]));
        assert_eq!(guess.customer.as_deref(), Some("RPL Name"));
        assert_eq!(guess.reference.as_deref(), Some("RPL Name"));
    }

    #[test]
    fn test_no_guess() {
        let guess = detect_columns(&headers(&["A", "B"]));
        assert_eq!(guess, ColumnGuess::default());
    }
}
