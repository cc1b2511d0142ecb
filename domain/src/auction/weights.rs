//! Criterion weights for score aggregation

use crate::core::error::DomainError;
use crate::proposal::CriterionScores;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Non-negative weight per criterion, fixed for the lifetime of a coordinator.
///
/// # Example
///
/// ```
/// use auction_domain::auction::CriterionWeights;
/// use auction_domain::proposal::CriterionScores;
///
/// let weights = CriterionWeights::default(); // novelty 0.4, executability 0.4, diversity 0.2
/// let metrics = CriterionScores::from([
///     ("novelty".to_string(), 8.0),
///     ("executability".to_string(), 6.0),
///     ("diversity".to_string(), 4.0),
/// ]);
/// assert!((weights.aggregate(&metrics) - 6.4).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionWeights {
    weights: BTreeMap<String, f64>,
}

impl CriterionWeights {
    /// Build validated weights
    pub fn try_new<K: Into<String>>(
        weights: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Self, DomainError> {
        let weights: BTreeMap<String, f64> =
            weights.into_iter().map(|(k, w)| (k.into(), w)).collect();
        Self::validate_map(&weights)?;
        Ok(Self { weights })
    }

    /// Check an already-built weights map (e.g. one read from config)
    pub fn validate(&self) -> Result<(), DomainError> {
        Self::validate_map(&self.weights)
    }

    fn validate_map(weights: &BTreeMap<String, f64>) -> Result<(), DomainError> {
        if weights.is_empty() {
            return Err(DomainError::EmptyWeights);
        }
        for (criterion, &weight) in weights {
            // infinity times a zero rating would score NaN
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(DomainError::NegativeWeight {
                    criterion: criterion.clone(),
                    weight,
                });
            }
        }
        Ok(())
    }

    /// Configured criterion names, in sorted order
    pub fn criteria(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Configured criterion names as owned strings
    pub fn criterion_names(&self) -> Vec<String> {
        self.weights.keys().cloned().collect()
    }

    pub fn get(&self, criterion: &str) -> Option<f64> {
        self.weights.get(criterion).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weighted sum over configured criteria; missing metrics count as 0
    pub fn aggregate(&self, metrics: &CriterionScores) -> f64 {
        self.weights
            .iter()
            .map(|(criterion, weight)| weight * metrics.get(criterion).copied().unwrap_or(0.0))
            .sum()
    }

    /// Keep exactly the configured criteria, filling missing ones with 0
    pub fn restrict(&self, metrics: &CriterionScores) -> CriterionScores {
        self.weights
            .keys()
            .map(|criterion| {
                let value = metrics.get(criterion).copied().unwrap_or(0.0);
                (criterion.clone(), value)
            })
            .collect()
    }

    /// Every configured criterion rated at `value`
    pub fn uniform_scores(&self, value: f64) -> CriterionScores {
        self.weights.keys().map(|c| (c.clone(), value)).collect()
    }
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                ("novelty".to_string(), 0.4),
                ("executability".to_string(), 0.4),
                ("diversity".to_string(), 0.2),
            ]),
        }
    }
}
