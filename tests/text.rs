//! Tests for text normalization, OCR-noise filtering and deduplication.
use flowscribe::config::QualityThresholds;
use flowscribe::text::fuzzy::{ratio, token_sort_ratio};
use flowscribe::text::{QualityFilter, dedupe, dedupe_with_threshold, is_good, normalize};

#[cfg(test)]
mod normalize_tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  Fill \t the\n\nform  "), "Fill the form");
        assert_eq!(normalize(" \n\t "), "");
    }
}

#[cfg(test)]
mod quality_tests {
    use super::*;

    #[test]
    fn test_basic_cases() {
        assert!(!is_good(""));
        assert!(!is_good("!!!"));
        assert!(is_good("Approve request"));
    }

    #[test]
    fn test_rejects_short_and_noisy_text() {
        // Too short.
        assert!(!is_good("Go!"));
        // Only punctuation, long enough.
        assert!(!is_good("----------"));
        // Fewer than three alphanumerics.
        assert!(!is_good("a - b"));
        // Alphanumeric share below 0.35.
        assert!(!is_good("ab - - - - c"));
        // Too many characters outside the allowed punctuation.
        assert!(!is_good("@@##abcd"));
    }

    #[test]
    fn test_allowed_punctuation_is_not_weird() {
        assert!(is_good("Pay 50% (VAT incl.)"));
        assert!(is_good("Check A/B, then C&D"));
    }

    #[test]
    fn test_counts_non_ascii_letters() {
        assert!(is_good("Проверить заявку"));
    }

    #[test]
    fn test_custom_thresholds() {
        let relaxed = QualityFilter::new(QualityThresholds {
            min_len: 2,
            min_alnum: 2,
            ..Default::default()
        });
        assert!(relaxed.is_good("OK"));
        assert!(!is_good("OK"));
    }
}

#[cfg(test)]
mod dedupe_tests {
    use super::*;

    #[test]
    fn test_identical_texts_collapse() {
        assert_eq!(dedupe(&["Approve request", "Approve request"]), vec!["Approve request"]);
    }

    #[test]
    fn test_ignores_case_whitespace_and_token_order() {
        let texts = ["Approve request", "approve   REQUEST", "request approve"];
        assert_eq!(dedupe(&texts), vec!["Approve request"]);
    }

    #[test]
    fn test_near_duplicates_collapse_and_distinct_texts_survive() {
        let texts = ["Approve request", "Ship order", "Approve requests", "Close order"];
        assert_eq!(
            dedupe(&texts),
            vec!["Approve request", "Ship order", "Close order"]
        );
    }

    #[test]
    fn test_drops_empty_entries() {
        let texts = ["", "   ", "Fill form"];
        assert_eq!(dedupe(&texts), vec!["Fill form"]);
    }

    #[test]
    fn test_threshold_is_respected() {
        let texts = ["Approve request", "Approve requests"];
        assert_eq!(dedupe_with_threshold(&texts, 100).len(), 2);
        assert_eq!(dedupe_with_threshold(&texts, 92).len(), 1);
    }
}

#[cfg(test)]
mod fuzzy_tests {
    use super::*;

    #[test]
    fn test_ratio_edges() {
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("abc", ""), 0.0);
        assert_eq!(ratio("same", "same"), 100.0);
    }

    #[test]
    fn test_ratio_is_case_sensitive() {
        assert!(ratio("ABC", "abc") < 100.0);
    }

    #[test]
    fn test_token_sort_ratio_ignores_order() {
        assert_eq!(token_sort_ratio("send invoice", "invoice  send"), 100.0);
    }
}
