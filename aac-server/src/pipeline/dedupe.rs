//! Order-preserving, case-insensitive deduplication

use std::collections::HashSet;

use aac_common::normalize;

/// Reduce `items` to its first occurrences under trim+lowercase
/// comparison, keeping original casing, stopping as soon as `limit`
/// items have been collected. Items past the cap are never evaluated.
pub fn dedupe(items: &[String], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for item in items {
        if unique.len() >= limit {
            break;
        }
        if seen.insert(normalize(item)) {
            unique.push(item.clone());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_occurrence_wins_keeping_original_casing() {
        let out = dedupe(&strs(&["Help", " help ", "HELP", "want"]), 10);
        assert_eq!(out, strs(&["Help", "want"]));
    }

    #[test]
    fn output_is_a_subsequence_with_no_case_insensitive_repeats() {
        let input = strs(&["go", "Stop", "more", "GO", "stop ", "I", "you", "i"]);
        let out = dedupe(&input, 10);
        assert_eq!(out, strs(&["go", "Stop", "more", "I", "you"]));

        let mut seen = HashSet::new();
        for item in &out {
            assert!(seen.insert(aac_common::normalize(item)));
        }
    }

    #[test]
    fn stops_at_limit() {
        let input = strs(&["a", "b", "c", "d"]);
        assert_eq!(dedupe(&input, 2), strs(&["a", "b"]));
        assert_eq!(dedupe(&input, 0), Vec::<String>::new());
    }

    #[test]
    fn limit_larger_than_input_returns_everything() {
        let input = strs(&["a", "b"]);
        assert_eq!(dedupe(&input, 100), input);
    }
}
