//! Auction configuration from TOML (`[auction]` section)

use auction_application::AuctionParams;
use auction_domain::{
    ConfigIssue, ConfigIssueCode, ConvergencePolicy, CriterionWeights, DomainError,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw auction configuration from TOML
///
/// # Example
///
/// ```toml
/// [auction]
/// max_iterations = 5
/// convergence = "utility_plateau"   # or "full_budget"
///
/// [auction.weights]
/// novelty = 0.4
/// executability = 0.4
/// diversity = 0.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuctionConfig {
    /// Criterion name → weight
    pub weights: BTreeMap<String, f64>,
    /// Maximum rounds per stage
    pub max_iterations: usize,
    /// "full_budget" or "utility_plateau"
    pub convergence: String,
    /// Rating used for every criterion when the critic fails
    pub neutral_score: f64,
    /// Characters of each peer proposal shown during evolution
    pub summary_chars: usize,
    /// Collect rubric evaluations in peer-evolution rounds
    pub peer_reviews: bool,
}

impl Default for FileAuctionConfig {
    fn default() -> Self {
        let defaults = AuctionParams::default();
        Self {
            weights: defaults
                .weights
                .criteria()
                .filter_map(|c| defaults.weights.get(c).map(|w| (c.to_string(), w)))
                .collect(),
            max_iterations: defaults.max_iterations,
            convergence: defaults.convergence.as_str().to_string(),
            neutral_score: defaults.neutral_score,
            summary_chars: defaults.summary_chars,
            peer_reviews: defaults.peer_reviews,
        }
    }
}

impl FileAuctionConfig {
    /// Parse the convergence policy, falling back to the default with a warning
    pub fn parse_convergence(&self) -> (ConvergencePolicy, Vec<ConfigIssue>) {
        match self.convergence.parse::<ConvergencePolicy>() {
            Ok(policy) => (policy, Vec::new()),
            Err(_) => (
                ConvergencePolicy::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "auction.convergence".to_string(),
                        value: self.convergence.clone(),
                        valid_values: ConvergencePolicy::valid_values(),
                    },
                    format!(
                        "auction.convergence: unknown value '{}', falling back to '{}'",
                        self.convergence,
                        ConvergencePolicy::default()
                    ),
                )],
            ),
        }
    }

    /// Parse the weights, falling back to the defaults on error
    pub fn parse_weights(&self) -> (CriterionWeights, Vec<ConfigIssue>) {
        match CriterionWeights::try_new(self.weights.clone()) {
            Ok(weights) => (weights, Vec::new()),
            Err(DomainError::NegativeWeight { criterion, weight }) => (
                CriterionWeights::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::NegativeWeight {
                        criterion: criterion.clone(),
                    },
                    format!(
                        "auction.weights.{}: weight must be finite and non-negative, got {}",
                        criterion, weight
                    ),
                )],
            ),
            Err(_) => (
                CriterionWeights::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyWeights,
                    "auction.weights: at least one criterion weight is required",
                )],
            ),
        }
    }

    /// Build application parameters, reporting every issue found
    pub fn to_params(&self) -> (AuctionParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let (weights, weight_issues) = self.parse_weights();
        issues.extend(weight_issues);
        let (convergence, convergence_issues) = self.parse_convergence();
        issues.extend(convergence_issues);

        if self.max_iterations == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroIterations,
                "auction.max_iterations must be at least 1",
            ));
        }

        let params = AuctionParams::default()
            .with_weights(weights)
            .with_max_iterations(self.max_iterations)
            .with_convergence(convergence)
            .with_neutral_score(self.neutral_score)
            .with_summary_chars(self.summary_chars)
            .with_peer_reviews(self.peer_reviews);
        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_application_defaults() {
        let (params, issues) = FileAuctionConfig::default().to_params();
        assert!(issues.is_empty());
        assert_eq!(params, AuctionParams::default());
    }

    #[test]
    fn test_unknown_convergence_warns() {
        let config = FileAuctionConfig {
            convergence: "never".to_string(),
            ..Default::default()
        };
        let (policy, issues) = config.parse_convergence();
        assert_eq!(policy, ConvergencePolicy::FullBudget);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_invalid_weights_are_errors() {
        let negative = FileAuctionConfig {
            weights: BTreeMap::from([("novelty".to_string(), -1.0)]),
            ..Default::default()
        };
        let (_, issues) = negative.parse_weights();
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::NegativeWeight {
                criterion: "novelty".to_string()
            }
        );

        let empty = FileAuctionConfig {
            weights: BTreeMap::new(),
            ..Default::default()
        };
        let (weights, issues) = empty.parse_weights();
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyWeights);
        assert_eq!(weights, CriterionWeights::default());
    }

    #[test]
    fn test_zero_iterations_is_error() {
        let config = FileAuctionConfig {
            max_iterations: 0,
            ..Default::default()
        };
        let (_, issues) = config.to_params();
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::ZeroIterations));
    }
}
