//! Feedback insights and whether a refinement took them up.
//!
//! An insight is one bullet or numbered line of feedback. It counts as
//! incorporated when at least half of its significant terms that the
//! previous proposal lacked show up in the refined proposal.

use super::similarity::tokens;
use std::collections::BTreeSet;

const MIN_TERM_LEN: usize = 5;

const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "being", "below", "could", "might", "other", "proposal",
    "should", "their", "there", "these", "those", "where", "which", "while", "would", "your",
];

/// Split feedback into insights.
///
/// Bullet (`-`, `*`, `•`) and numbered (`1.`, `2)`) lines each become one
/// insight. Feedback without such lines is a single insight; blank feedback
/// has none.
pub fn split_insights(feedback: &str) -> Vec<String> {
    let items: Vec<String> = feedback
        .lines()
        .filter_map(strip_list_marker)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if !items.is_empty() {
        return items;
    }

    let whole = feedback.trim();
    if whole.is_empty() {
        Vec::new()
    } else {
        vec![whole.to_string()]
    }
}

fn strip_list_marker(line: &str) -> Option<&str> {
    let line = line.trim_start();
    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return Some(rest.trim());
        }
    }

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(str::trim)
}

fn significant_terms(text: &str) -> BTreeSet<String> {
    tokens(text)
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_TERM_LEN && !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Whether `after` demonstrably takes up `insight` relative to `before`.
///
/// Insights that introduce no new significant term cannot be demonstrated
/// and return `false`.
pub fn is_incorporated(insight: &str, before: &str, after: &str) -> bool {
    let before_terms = significant_terms(before);
    let new_terms: Vec<String> = significant_terms(insight)
        .into_iter()
        .filter(|t| !before_terms.contains(t))
        .collect();

    if new_terms.is_empty() {
        return false;
    }

    let after_terms = significant_terms(after);
    let adopted = new_terms.iter().filter(|t| after_terms.contains(*t)).count();
    adopted * 2 >= new_terms.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bullets_and_numbers() {
        let feedback = "Overall decent.\n- Add input validation\n* Cover timeouts\n2. Document the retry policy\n3) Benchmark lookups";
        assert_eq!(
            split_insights(feedback),
            vec![
                "Add input validation",
                "Cover timeouts",
                "Document the retry policy",
                "Benchmark lookups",
            ]
        );
    }

    #[test]
    fn test_split_plain_text_is_one_insight() {
        assert_eq!(
            split_insights("  Consider caching results.  "),
            vec!["Consider caching results."]
        );
        assert!(split_insights("   \n ").is_empty());
    }

    #[test]
    fn test_numbers_without_marker_are_not_items() {
        assert_eq!(split_insights("2024 was a good year"), vec!["2024 was a good year"]);
    }

    #[test]
    fn test_incorporated() {
        let before = "Store items in a list.";
        let after = "Store items in a list with input validation and bounded retries.";
        assert!(is_incorporated("Add input validation", before, after));
        assert!(!is_incorporated("Benchmark lookups under concurrent writers", before, after));
    }

    #[test]
    fn test_nothing_new_is_not_demonstrable() {
        assert!(!is_incorporated("Keep the list", "Keep the list of items", "Keep the list"));
    }
}
