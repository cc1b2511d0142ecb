//! Auction coordinator
//!
//! Scores a round's pool through the [`Critic`], picks the winner, and asks
//! the critic for feedback to every loser. Critic failures are replaced by
//! neutral scores or generic feedback, so every operation here is total.

use crate::ports::critic::Critic;
use auction_domain::auction::fallback::{NEUTRAL_SCORE, feedback_or_generic, scores_or_neutral};
use auction_domain::{
    CriterionScores, CriterionWeights, ProposalPool, ProposalRecord, Recovered, select_winner,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Scores and metrics for one owner, computed outside any pool
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerEvaluation {
    pub owner: String,
    pub metrics: CriterionScores,
    pub score: f64,
    /// Whether the critic failed and neutral scores were used
    pub fallback: bool,
}

/// Runs the scoring auction for one role group
pub struct AuctionCoordinator {
    weights: CriterionWeights,
    critic: Arc<dyn Critic>,
    neutral_score: f64,
}

impl AuctionCoordinator {
    pub fn new(weights: CriterionWeights, critic: Arc<dyn Critic>) -> Self {
        Self {
            weights,
            critic,
            neutral_score: NEUTRAL_SCORE,
        }
    }

    pub fn with_neutral_score(mut self, score: f64) -> Self {
        self.neutral_score = score;
        self
    }

    pub fn weights(&self) -> &CriterionWeights {
        &self.weights
    }

    /// Score every record in `pool`.
    ///
    /// Each record ends up with metrics for exactly the configured criteria
    /// and their weighted sum as score. Returns the number of records that
    /// fell back to neutral scores.
    pub async fn score_proposals(&self, pool: &mut ProposalPool, task: &str) -> usize {
        let criteria = self.weights.criterion_names();
        let mut fallbacks = 0;

        for record in pool.records_mut() {
            let result = self.critic.score(&record.content, task, &criteria).await;
            let recovered = scores_or_neutral(result, &self.weights, self.neutral_score);
            if let Some(failure) = &recovered.failure {
                warn!(
                    "Scoring {} failed, using neutral scores: {}",
                    record.owner, failure
                );
                fallbacks += 1;
            }
            let (score, metrics) = self.weigh(&recovered.value);
            debug!("Scored {} at {:.2}", record.owner, score);
            record.set_evaluation(score, metrics);
        }

        fallbacks
    }

    /// Highest-scoring record; first in `records` order on ties
    pub fn select_winner<'a>(&self, records: &'a [ProposalRecord]) -> Option<&'a ProposalRecord> {
        select_winner(records)
    }

    /// Feedback for `loser`, contrasted with `winner`
    pub async fn generate_feedback(
        &self,
        loser: &ProposalRecord,
        winner: &ProposalRecord,
        task: &str,
    ) -> Recovered<String> {
        let result = self
            .critic
            .feedback(&loser.content, &winner.content, task)
            .await;
        let recovered = feedback_or_generic(result);
        if let Some(failure) = &recovered.failure {
            warn!(
                "Feedback for {} failed, using generic guidance: {}",
                loser.owner, failure
            );
        }
        recovered
    }

    /// Score each `(owner, content)` entry with the others visible as context.
    ///
    /// Results keep the input order. No pool is touched.
    pub async fn evaluate_many(
        &self,
        contents: &[(String, String)],
        task: &str,
    ) -> Vec<OwnerEvaluation> {
        let criteria = self.weights.criterion_names();
        let mut evaluations = Vec::with_capacity(contents.len());

        for (owner, content) in contents {
            let peers: Vec<(String, String)> = contents
                .iter()
                .filter(|(other, _)| other != owner)
                .cloned()
                .collect();
            let result = self
                .critic
                .score_with_peers(content, task, &criteria, &peers)
                .await;
            let recovered = scores_or_neutral(result, &self.weights, self.neutral_score);
            if let Some(failure) = &recovered.failure {
                warn!("Evaluating {} failed, using neutral scores: {}", owner, failure);
            }
            let (score, metrics) = self.weigh(&recovered.value);
            evaluations.push(OwnerEvaluation {
                owner: owner.clone(),
                metrics,
                score,
                fallback: recovered.is_fallback(),
            });
        }

        evaluations
    }

    fn weigh(&self, ratings: &CriterionScores) -> (f64, CriterionScores) {
        let metrics = self.weights.restrict(ratings);
        (self.weights.aggregate(&metrics), metrics)
    }
}
