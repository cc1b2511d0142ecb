//! Auction parameters: round loop control.
//!
//! [`AuctionParams`] groups the static parameters that control a stage's
//! round loop in [`RunStageUseCase`](crate::use_cases::run_stage::RunStageUseCase)
//! and its variants.

use auction_domain::auction::fallback::NEUTRAL_SCORE;
use auction_domain::{ConvergencePolicy, CriterionWeights, DomainError};
use serde::{Deserialize, Serialize};

/// Round loop control parameters.
///
/// # Use case coverage
///
/// | Use case        | weights | max_iterations | convergence | summary_chars |
/// |-----------------|---------|----------------|-------------|---------------|
/// | Stage           | Yes     | Yes            | Yes         | No            |
/// | Peer evolution  | Yes     | Yes            | Plateau     | Yes           |
/// | Naive baseline  | Yes     | No             | No          | No            |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionParams {
    /// Criterion weights used to aggregate critic ratings
    pub weights: CriterionWeights,
    /// Maximum number of rounds per stage
    pub max_iterations: usize,
    /// When a stage may stop before its budget is spent
    pub convergence: ConvergencePolicy,
    /// Rating given to every criterion when the critic fails
    pub neutral_score: f64,
    /// Characters of each peer proposal shown to an evolving agent
    pub summary_chars: usize,
    /// Whether peer-evolution rounds also collect rubric evaluations
    pub peer_reviews: bool,
}

impl Default for AuctionParams {
    fn default() -> Self {
        Self {
            weights: CriterionWeights::default(),
            max_iterations: 5,
            convergence: ConvergencePolicy::FullBudget,
            neutral_score: NEUTRAL_SCORE,
            summary_chars: 500,
            peer_reviews: false,
        }
    }
}

impl AuctionParams {
    // ==================== Builder Methods ====================

    pub fn with_weights(mut self, weights: CriterionWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_convergence(mut self, policy: ConvergencePolicy) -> Self {
        self.convergence = policy;
        self
    }

    pub fn with_neutral_score(mut self, score: f64) -> Self {
        self.neutral_score = score;
        self
    }

    pub fn with_summary_chars(mut self, chars: usize) -> Self {
        self.summary_chars = chars;
        self
    }

    pub fn with_peer_reviews(mut self, enabled: bool) -> Self {
        self.peer_reviews = enabled;
        self
    }

    /// Reject parameters no stage can run with
    pub fn validate(&self) -> Result<(), DomainError> {
        self.weights.validate()?;
        if self.max_iterations == 0 {
            return Err(DomainError::ZeroIterations);
        }
        Ok(())
    }
}
