//! Run Peer Evolution use case
//!
//! The utility-convergence variant of a stage. Agents never receive critic
//! feedback; instead every round each agent evolves from the strongest of
//! its peers, and the stage stops as soon as no agent's utility improves.
//! `max_iterations` counts evolution rounds, so a stage records up to
//! `max_iterations + 1` rounds including the initial generation.
//!
//! ```text
//! generate ─▶ evaluate_many ─▶ ┌─ evolve from peers (round-start snapshot)
//!                              │  evaluate_many
//!                              └─ any utility up? ── yes ─▶ next round
//!                                                  └ no ──▶ converged
//! ```

use super::run_stage::{RunStageError, RunStageInput, finish};
use super::shared::{AuctionServices, pool_diversity};
use crate::ports::conversation_logger::events;
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use crate::services::{Agent, AuctionCoordinator, OwnerEvaluation};
use auction_domain::{
    ConvergencePolicy, PeerProposal, ProposalRecord, Recovered, RoundRecord, StageOutcome,
    StageTermination, select_winner,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Use case for running a peer-evolution stage
pub struct RunPeerEvolutionUseCase {
    services: AuctionServices,
}

impl RunPeerEvolutionUseCase {
    pub fn new(services: AuctionServices) -> Self {
        Self { services }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunStageInput) -> Result<StageOutcome, RunStageError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// `params.convergence` is ignored: this variant always stops on a
    /// utility plateau.
    pub async fn execute_with_progress(
        &self,
        input: RunStageInput,
        progress: &dyn StageProgressNotifier,
    ) -> Result<StageOutcome, RunStageError> {
        let RunStageInput {
            role,
            task,
            agents,
            params,
        } = input;
        params.validate()?;
        let mut agents = self
            .services
            .build_agents(&role, &agents, params.summary_chars)?;
        let coordinator =
            AuctionCoordinator::new(params.weights.clone(), Arc::clone(&self.services.critic))
                .with_neutral_score(params.neutral_score);
        let task_text = task.content();

        info!(
            "Starting {} peer-evolution stage with {} agents",
            role,
            agents.len()
        );
        // initial generation plus one round per evolution
        let total_rounds = params.max_iterations + 1;
        progress.on_stage_start(&role, agents.len(), total_rounds);
        self.services.log(
            events::STAGE_STARTED,
            json!({
                "role": role,
                "task": task_text,
                "agents": agents.iter().map(|a| a.name()).collect::<Vec<_>>(),
                "max_iterations": params.max_iterations,
                "convergence": ConvergencePolicy::UtilityPlateau,
            }),
        );

        let mut rounds: Vec<RoundRecord> = Vec::new();
        let mut utilities: HashMap<String, f64> = HashMap::new();
        let mut termination = StageTermination::BudgetExhausted;

        for round in 1..=total_rounds {
            progress.on_round_start(&role, round);

            // Every agent sees the same round-start snapshot
            let snapshot = snapshot(&agents);
            let mut submissions = Vec::with_capacity(agents.len());
            for agent in agents.iter_mut() {
                let submitted = if round == 1 {
                    agent.generate_proposal(task_text).await
                } else {
                    agent.evolve_from_peers(&snapshot, &utilities).await?
                };
                progress.on_proposal_ready(&role, agent.name(), submitted.is_fallback());
                self.services
                    .log_submission(&role, round, &submitted.value, submitted.is_fallback());
                submissions.push(submitted);
            }

            let peer_reviews = if params.peer_reviews {
                let current = snapshot_of(&submissions);
                let mut reviews = Vec::new();
                for agent in &agents {
                    reviews.extend(agent.evaluate_peers(&current).await);
                }
                reviews
            } else {
                Vec::new()
            };

            let contents: Vec<(String, String)> = submissions
                .iter()
                .map(|s| (s.value.owner.clone(), s.value.content.clone()))
                .collect();
            let evaluations = coordinator.evaluate_many(&contents, task_text).await;
            let proposals = scored_records(submissions, &evaluations);
            self.services.log_scores(&role, round, &proposals);

            let improved = evaluations.iter().any(|e| {
                utilities
                    .get(&e.owner)
                    .is_some_and(|previous| e.score > *previous)
            });
            utilities = evaluations
                .iter()
                .map(|e| (e.owner.clone(), e.score))
                .collect();

            let winner = select_winner(&proposals).cloned();
            progress.on_round_complete(&role, round, winner.as_ref());
            if let Some(winner) = &winner {
                debug!("{} round {}: {} leads", role, round, winner.owner);
                self.services.log(
                    events::WINNER_SELECTED,
                    json!({
                        "role": role,
                        "round": round,
                        "owner": winner.owner,
                        "score": winner.score,
                    }),
                );
            }

            rounds.push(RoundRecord {
                round,
                diversity: pool_diversity(&proposals),
                proposals,
                winner: winner.map(|w| w.owner),
                feedback: Vec::new(),
                peer_reviews,
            });

            if round > 1 && !improved {
                info!("{} peer evolution converged after round {}", role, round);
                termination = StageTermination::Converged;
                break;
            }
        }

        if rounds.last().is_some_and(|r| r.winner.is_none()) {
            self.services.log(
                events::NO_WINNER,
                json!({ "role": role, "round": rounds.len() }),
            );
            termination = StageTermination::NoWinner;
        }

        let outcome = finish(
            role,
            task,
            rounds,
            ConvergencePolicy::UtilityPlateau,
            termination,
        );
        self.services.log(
            events::STAGE_COMPLETED,
            json!({
                "role": outcome.role,
                "rounds": outcome.round_count(),
                "winner": outcome.winner.as_ref().map(|w| w.owner.as_str()),
                "termination": outcome.termination,
                "output": outcome.output,
            }),
        );
        progress.on_stage_complete(&outcome.role);
        Ok(outcome)
    }
}

fn snapshot(agents: &[Agent]) -> Vec<PeerProposal> {
    agents
        .iter()
        .filter_map(|a| {
            a.current_proposal()
                .map(|content| PeerProposal::new(a.name(), content))
        })
        .collect()
}

fn snapshot_of(submissions: &[Recovered<ProposalRecord>]) -> Vec<PeerProposal> {
    submissions
        .iter()
        .map(|s| PeerProposal::new(s.value.owner.as_str(), s.value.content.as_str()))
        .collect()
}

fn scored_records(
    submissions: Vec<Recovered<ProposalRecord>>,
    evaluations: &[OwnerEvaluation],
) -> Vec<ProposalRecord> {
    submissions
        .into_iter()
        .zip(evaluations)
        .map(|(submitted, evaluation)| {
            submitted
                .into_value()
                .with_score(evaluation.score, evaluation.metrics.clone())
        })
        .collect()
}
