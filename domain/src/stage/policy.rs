//! When a stage stops before its iteration budget

use serde::{Deserialize, Serialize};

/// Stopping rule for the round loop.
///
/// Either way a stage also stops early when a round produces no winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConvergencePolicy {
    /// Always run every iteration
    #[default]
    FullBudget,
    /// Stop after a round (from the second on) in which no agent improved
    /// on its own previous-round score
    UtilityPlateau,
}

impl ConvergencePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConvergencePolicy::FullBudget => "full_budget",
            ConvergencePolicy::UtilityPlateau => "utility_plateau",
        }
    }

    pub fn valid_values() -> Vec<String> {
        vec!["full_budget".to_string(), "utility_plateau".to_string()]
    }
}

impl std::fmt::Display for ConvergencePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConvergencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "full_budget" | "full" => Ok(ConvergencePolicy::FullBudget),
            "utility_plateau" | "plateau" => Ok(ConvergencePolicy::UtilityPlateau),
            other => Err(format!(
                "Unknown convergence policy: {}. Valid: full_budget, utility_plateau",
                other
            )),
        }
    }
}
