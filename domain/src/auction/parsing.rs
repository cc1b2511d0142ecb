//! Critic response parsing.
//!
//! Extracts per-criterion ratings from a critic's free-form reply. Pure text
//! handling, no I/O.
//!
//! The critic is asked for a JSON object such as
//! `{"novelty": 8, "executability": 7, "diversity": 6}`. Models often wrap
//! it in prose or code fences, so the first `{` .. last `}` span is parsed.

use crate::core::error::CollaboratorFailure;
use crate::proposal::CriterionScores;
use serde_json::Value;

/// Parse a rating reply into scores for the requested criteria.
///
/// - Keys match case-insensitively, treating spaces, `-` and `_` alike
/// - Values may be JSON numbers or numeric strings; negatives clamp to 0
/// - Unknown keys are ignored; criteria absent from the reply are left out
///
/// Fails with [`CollaboratorFailure::MalformedOutput`] when no JSON object is
/// found or none of the requested criteria has a numeric value.
///
/// # Examples
///
/// ```
/// use auction_domain::auction::parse_criterion_scores;
///
/// let criteria = vec!["novelty".to_string(), "diversity".to_string()];
/// let scores = parse_criterion_scores(
///     "Here you go:\n```json\n{\"Novelty\": 8, \"diversity\": \"6.5\"}\n```",
///     &criteria,
/// )
/// .unwrap();
/// assert_eq!(scores["novelty"], 8.0);
/// assert_eq!(scores["diversity"], 6.5);
///
/// assert!(parse_criterion_scores("no numbers", &criteria).is_err());
/// ```
pub fn parse_criterion_scores(
    response: &str,
    criteria: &[String],
) -> Result<CriterionScores, CollaboratorFailure> {
    if response.trim().is_empty() {
        return Err(CollaboratorFailure::EmptyResponse);
    }

    let object = extract_json_object(response).ok_or_else(|| {
        CollaboratorFailure::MalformedOutput("no JSON object in critic reply".to_string())
    })?;

    let mut scores = CriterionScores::new();
    for criterion in criteria {
        let wanted = normalize_key(criterion);
        let value = object
            .iter()
            .find(|(key, _)| normalize_key(key) == wanted)
            .and_then(|(_, value)| numeric_value(value));
        if let Some(value) = value {
            scores.insert(criterion.clone(), value.max(0.0));
        }
    }

    if scores.is_empty() {
        return Err(CollaboratorFailure::MalformedOutput(format!(
            "none of the criteria [{}] rated",
            criteria.join(", ")
        )));
    }

    Ok(scores)
}

fn extract_json_object(response: &str) -> Option<serde_json::Map<String, Value>> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<Value>(&response[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> Vec<String> {
        vec![
            "novelty".to_string(),
            "executability".to_string(),
            "diversity".to_string(),
        ]
    }

    #[test]
    fn test_plain_json() {
        let scores =
            parse_criterion_scores(r#"{"novelty": 8, "executability": 7, "diversity": 6}"#, &criteria())
                .unwrap();
        assert_eq!(scores.len(), 3);
        assert_eq!(scores["executability"], 7.0);
    }

    #[test]
    fn test_json_wrapped_in_prose() {
        let reply = "Sure! My evaluation:\n{\"novelty\": 9.5, \"executability\": 4}\nHope it helps.";
        let scores = parse_criterion_scores(reply, &criteria()).unwrap();
        assert_eq!(scores["novelty"], 9.5);
        assert!(!scores.contains_key("diversity"));
    }

    #[test]
    fn test_key_normalization() {
        let criteria = vec!["code_novelty".to_string()];
        let scores = parse_criterion_scores(r#"{"Code Novelty": 3}"#, &criteria).unwrap();
        assert_eq!(scores["code_novelty"], 3.0);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let scores = parse_criterion_scores(r#"{"novelty": 2, "elegance": 10}"#, &criteria()).unwrap();
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn test_negative_clamped() {
        let scores = parse_criterion_scores(r#"{"novelty": -4}"#, &criteria()).unwrap();
        assert_eq!(scores["novelty"], 0.0);
    }

    #[test]
    fn test_malformed_replies() {
        assert_eq!(
            parse_criterion_scores("   ", &criteria()),
            Err(CollaboratorFailure::EmptyResponse)
        );
        assert!(matches!(
            parse_criterion_scores("I'd give it an 8", &criteria()),
            Err(CollaboratorFailure::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_criterion_scores("{not json}", &criteria()),
            Err(CollaboratorFailure::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_criterion_scores(r#"{"novelty": "high"}"#, &criteria()),
            Err(CollaboratorFailure::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_criterion_scores("} backwards {", &criteria()),
            Err(CollaboratorFailure::MalformedOutput(_))
        ));
    }
}
