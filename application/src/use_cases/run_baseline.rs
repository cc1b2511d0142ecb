//! Run Baseline use case
//!
//! Single-shot competitions used as reference points for the auction:
//!
//! - **Naive**: every agent proposes once, the pool is scored once, the top
//!   proposal wins
//! - **Isolated**: every agent proposes once; nothing is scored or ranked

use super::run_stage::{RunStageError, RunStageInput, finish};
use super::shared::{AuctionServices, pool_diversity};
use crate::ports::conversation_logger::events;
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use crate::services::AuctionCoordinator;
use auction_domain::{ProposalPool, RoundRecord, StageOutcome, StageTermination};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Which baseline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineMode {
    Naive,
    Isolated,
}

/// Use case for running a baseline competition
pub struct RunBaselineUseCase {
    services: AuctionServices,
}

impl RunBaselineUseCase {
    pub fn new(services: AuctionServices) -> Self {
        Self { services }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunStageInput,
        mode: BaselineMode,
    ) -> Result<StageOutcome, RunStageError> {
        self.execute_with_progress(input, mode, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Only one round ever runs; `max_iterations` and `convergence` are
    /// ignored.
    pub async fn execute_with_progress(
        &self,
        input: RunStageInput,
        mode: BaselineMode,
        progress: &dyn StageProgressNotifier,
    ) -> Result<StageOutcome, RunStageError> {
        let RunStageInput {
            role,
            task,
            agents,
            params,
        } = input;
        params.weights.validate()?;
        let mut agents = self
            .services
            .build_agents(&role, &agents, params.summary_chars)?;
        let task_text = task.content();

        info!("Starting {:?} baseline for {} with {} agents", mode, role, agents.len());
        progress.on_stage_start(&role, agents.len(), 1);
        self.services.log(
            events::STAGE_STARTED,
            json!({
                "role": role,
                "task": task_text,
                "agents": agents.iter().map(|a| a.name()).collect::<Vec<_>>(),
                "baseline": mode,
            }),
        );
        progress.on_round_start(&role, 1);

        let mut pool = ProposalPool::new();
        for agent in agents.iter_mut() {
            let submitted = agent.generate_proposal(task_text).await;
            progress.on_proposal_ready(&role, agent.name(), submitted.is_fallback());
            self.services
                .log_submission(&role, 1, &submitted.value, submitted.is_fallback());
            pool.add(submitted.value);
        }

        let (winner, termination) = match mode {
            BaselineMode::Isolated => (None, StageTermination::Unranked),
            BaselineMode::Naive => {
                let coordinator = AuctionCoordinator::new(
                    params.weights.clone(),
                    Arc::clone(&self.services.critic),
                )
                .with_neutral_score(params.neutral_score);
                coordinator.score_proposals(&mut pool, task_text).await;
                self.services.log_scores(&role, 1, pool.get_all());

                match coordinator.select_winner(pool.get_all()) {
                    Some(winner) => {
                        self.services.log(
                            events::WINNER_SELECTED,
                            json!({
                                "role": role,
                                "round": 1,
                                "owner": winner.owner,
                                "score": winner.score,
                            }),
                        );
                        (Some(winner.owner.clone()), StageTermination::BudgetExhausted)
                    }
                    None => {
                        self.services
                            .log(events::NO_WINNER, json!({ "role": role, "round": 1 }));
                        (None, StageTermination::NoWinner)
                    }
                }
            }
        };
        progress.on_round_complete(
            &role,
            1,
            winner
                .as_deref()
                .and_then(|w| pool.get_all().iter().find(|r| r.owner == w)),
        );

        let rounds = vec![RoundRecord {
            round: 1,
            diversity: pool_diversity(pool.get_all()),
            proposals: pool.into_records(),
            winner,
            feedback: Vec::new(),
            peer_reviews: Vec::new(),
        }];
        let outcome = finish(role, task, rounds, params.convergence, termination);
        self.services.log(
            events::STAGE_COMPLETED,
            json!({
                "role": outcome.role,
                "rounds": 1,
                "winner": outcome.winner.as_ref().map(|w| w.owner.as_str()),
                "termination": outcome.termination,
                "output": outcome.output,
            }),
        );
        progress.on_stage_complete(&outcome.role);
        Ok(outcome)
    }
}
