//! Run Stage use case
//!
//! Drives one role group through the auction round loop:
//!
//! ```text
//! generate / refine ─▶ pool ─▶ score ─▶ select winner ─▶ feedback to losers
//!        ▲                                                      │
//!        └──────────────────────── next round ◀─────────────────┘
//! ```
//!
//! Every agent submits before anything is scored, so all proposals of a
//! round are judged against the same peer set.

use super::shared::{AuctionServices, pool_diversity};
use crate::config::AuctionParams;
use crate::ports::conversation_logger::events;
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use crate::services::AuctionCoordinator;
use auction_domain::{
    ConvergencePolicy, DomainError, FeedbackEntry, ProposalPool, Role, RoundRecord, StageOutcome,
    StageTermination, TaskDescription,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during stage execution.
///
/// Only invalid input produces an error; collaborator failures are always
/// recovered inside the round loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunStageError {
    #[error("Invalid stage input: {0}")]
    InvalidInput(#[from] DomainError),
}

/// Input for the RunStage use case
#[derive(Debug, Clone)]
pub struct RunStageInput {
    pub role: Role,
    pub task: TaskDescription,
    /// Agent names, unique within the group
    pub agents: Vec<String>,
    pub params: AuctionParams,
}

impl RunStageInput {
    pub fn new(role: Role, task: TaskDescription, agents: Vec<String>) -> Self {
        Self {
            role,
            task,
            agents,
            params: AuctionParams::default(),
        }
    }

    pub fn with_params(mut self, params: AuctionParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for running one auction stage
pub struct RunStageUseCase {
    services: AuctionServices,
}

impl RunStageUseCase {
    pub fn new(services: AuctionServices) -> Self {
        Self { services }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunStageInput) -> Result<StageOutcome, RunStageError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
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
            "Starting {} stage with {} agents, up to {} rounds",
            role,
            agents.len(),
            params.max_iterations
        );
        progress.on_stage_start(&role, agents.len(), params.max_iterations);
        self.services.log(
            events::STAGE_STARTED,
            json!({
                "role": role,
                "task": task_text,
                "agents": agents.iter().map(|a| a.name()).collect::<Vec<_>>(),
                "max_iterations": params.max_iterations,
                "convergence": params.convergence,
            }),
        );

        let mut pending_feedback: HashMap<String, String> = HashMap::new();
        let mut previous_scores: HashMap<String, f64> = HashMap::new();
        let mut rounds: Vec<RoundRecord> = Vec::new();
        let mut termination = StageTermination::BudgetExhausted;

        for round in 1..=params.max_iterations {
            debug!("{} round {}", role, round);
            progress.on_round_start(&role, round);

            // 1. Collect: losers refine, everyone else (re)generates
            let mut pool = ProposalPool::new();
            for agent in agents.iter_mut() {
                let submitted = match pending_feedback.remove(agent.name()) {
                    Some(feedback) => agent.refine_proposal(&feedback).await?,
                    None => agent.generate_proposal(task_text).await,
                };
                progress.on_proposal_ready(&role, agent.name(), submitted.is_fallback());
                self.services
                    .log_submission(&role, round, &submitted.value, submitted.is_fallback());
                pool.add(submitted.value);
            }

            // 2. Score the complete pool
            coordinator.score_proposals(&mut pool, task_text).await;
            self.services.log_scores(&role, round, pool.get_all());
            let diversity = pool_diversity(pool.get_all());

            // 3. Select
            let Some(winner) = coordinator.select_winner(pool.get_all()).cloned() else {
                warn!("{} round {} produced no winner, ending stage", role, round);
                self.services
                    .log(events::NO_WINNER, json!({ "role": role, "round": round }));
                progress.on_round_complete(&role, round, None);
                rounds.push(RoundRecord {
                    round,
                    proposals: pool.into_records(),
                    winner: None,
                    feedback: Vec::new(),
                    diversity,
                    peer_reviews: Vec::new(),
                });
                termination = StageTermination::NoWinner;
                break;
            };
            info!(
                "{} round {}: {} wins with {:.2}",
                role,
                round,
                winner.owner,
                winner.score.unwrap_or_default()
            );
            self.services.log(
                events::WINNER_SELECTED,
                json!({
                    "role": role,
                    "round": round,
                    "owner": winner.owner,
                    "score": winner.score,
                }),
            );

            // 4. Feedback to every loser; the winner gets none
            let mut feedback = Vec::new();
            for loser in pool.get_all().iter().filter(|r| r.owner != winner.owner) {
                let recovered = coordinator
                    .generate_feedback(loser, &winner, task_text)
                    .await;
                self.services.log(
                    events::FEEDBACK_ISSUED,
                    json!({
                        "role": role,
                        "round": round,
                        "recipient": loser.owner,
                        "text": recovered.value,
                        "fallback": recovered.is_fallback(),
                    }),
                );
                pending_feedback.insert(loser.owner.clone(), recovered.value.clone());
                feedback.push(FeedbackEntry {
                    recipient: loser.owner.clone(),
                    fallback: recovered.is_fallback(),
                    text: recovered.value,
                });
            }
            progress.on_round_complete(&role, round, Some(&winner));

            let scores: HashMap<String, f64> = pool
                .get_all()
                .iter()
                .filter_map(|r| r.score.map(|s| (r.owner.clone(), s)))
                .collect();
            let improved = scores
                .iter()
                .any(|(owner, score)| previous_scores.get(owner).is_some_and(|old| score > old));

            rounds.push(RoundRecord {
                round,
                proposals: pool.into_records(),
                winner: Some(winner.owner),
                feedback,
                diversity,
                peer_reviews: Vec::new(),
            });

            if params.convergence == ConvergencePolicy::UtilityPlateau && round > 1 && !improved {
                info!("{} stage converged after round {}", role, round);
                termination = StageTermination::Converged;
                break;
            }
            previous_scores = scores;
        }

        let outcome = finish(role, task, rounds, params.convergence, termination);
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

/// Build the outcome; without a final winner the output is the task itself
pub(crate) fn finish(
    role: Role,
    task: TaskDescription,
    rounds: Vec<RoundRecord>,
    convergence: ConvergencePolicy,
    termination: StageTermination,
) -> StageOutcome {
    let winner = match termination {
        StageTermination::NoWinner | StageTermination::Unranked => None,
        _ => rounds.last().and_then(|r| r.winning_proposal()).cloned(),
    };
    let output = winner
        .as_ref()
        .map(|w| w.content.clone())
        .unwrap_or_else(|| task.content().to_string());

    StageOutcome {
        role,
        task: task.into_content(),
        output,
        winner,
        rounds,
        convergence,
        termination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingCritic, RecordingLogger, ScriptedCritic, ScriptedGenerator, scores};
    use auction_domain::GuidelineStore;

    fn services(critic: Arc<dyn crate::ports::critic::Critic>) -> AuctionServices {
        AuctionServices::new(
            Arc::new(ScriptedGenerator::new()),
            critic,
            Arc::new(GuidelineStore::with_defaults()),
        )
    }

    /// Engineer-2's proposals always rate highest
    fn favouring_second() -> Arc<ScriptedCritic> {
        Arc::new(ScriptedCritic::new(|content| {
            let novelty = if content.starts_with("Engineer-2") { 9.0 } else { 5.0 };
            Ok(scores(&[("novelty", novelty), ("executability", 6.0), ("diversity", 4.0)]))
        }))
    }

    fn input(iterations: usize) -> RunStageInput {
        RunStageInput::new(
            Role::Engineer,
            TaskDescription::try_new("Build a rate limiter").unwrap(),
            (1..=4).map(|i| Role::Engineer.agent_name(i)).collect(),
        )
        .with_params(AuctionParams::default().with_max_iterations(iterations))
    }

    #[tokio::test]
    async fn test_three_rounds_of_four() {
        let use_case = RunStageUseCase::new(services(favouring_second()));

        let outcome = use_case.execute(input(3)).await.unwrap();

        assert_eq!(outcome.round_count(), 3);
        for (i, round) in outcome.rounds.iter().enumerate() {
            assert_eq!(round.round, i + 1);
            assert_eq!(round.proposals.len(), 4);
            assert!(round.proposals.iter().all(|p| p.is_scored()));
            assert_eq!(round.winner.as_deref(), Some("Engineer-2"));
            assert_eq!(round.feedback.len(), 3);
            assert!(round.feedback_for("Engineer-2").is_none());
        }
        assert_eq!(outcome.termination, StageTermination::BudgetExhausted);
        let final_winner = outcome.rounds[2].winning_proposal().unwrap();
        assert_eq!(outcome.output, final_winner.content);
        assert_eq!(outcome.winner.as_ref(), Some(final_winner));
    }

    #[tokio::test]
    async fn test_losers_refine_and_winner_regenerates() {
        let use_case = RunStageUseCase::new(services(favouring_second()));

        let outcome = use_case.execute(input(2)).await.unwrap();

        let second = &outcome.rounds[1];
        let loser = second.proposal_of("Engineer-1").unwrap();
        assert_eq!(loser.version, 1);
        assert!(loser.content.contains("[revised: - Follow the winner's structure]"));

        let winner = second.proposal_of("Engineer-2").unwrap();
        assert_eq!(winner.version, 1);
        assert_eq!(winner.content, "Engineer-2: proposal for Build a rate limiter");
    }

    #[tokio::test]
    async fn test_failing_critic_still_completes() {
        let use_case = RunStageUseCase::new(services(Arc::new(FailingCritic)));

        let outcome = use_case.execute(input(2)).await.unwrap();

        assert_eq!(outcome.round_count(), 2);
        let first = &outcome.rounds[0];
        assert!(first.proposals.iter().all(|p| p.score == Some(5.0)));
        // all tied: first agent in insertion order wins
        assert_eq!(first.winner.as_deref(), Some("Engineer-1"));
        assert!(first.feedback.iter().all(|f| f.fallback));
    }

    #[tokio::test]
    async fn test_no_winner_ends_stage_with_task() {
        let critic = Arc::new(ScriptedCritic::new(|_| Ok(scores(&[("novelty", f64::NAN)]))));
        let logger = Arc::new(RecordingLogger::default());
        let use_case = RunStageUseCase::new(services(critic).with_logger(logger.clone()));

        let outcome = use_case.execute(input(3)).await.unwrap();

        assert_eq!(outcome.round_count(), 1);
        assert_eq!(outcome.termination, StageTermination::NoWinner);
        assert_eq!(outcome.output, "Build a rate limiter");
        assert!(outcome.winner.is_none());
        assert!(logger.event_types().contains(&events::NO_WINNER));
    }

    #[tokio::test]
    async fn test_utility_plateau_stops_early() {
        let critic = Arc::new(ScriptedCritic::new(|_| {
            Ok(scores(&[("novelty", 6.0), ("executability", 6.0), ("diversity", 6.0)]))
        }));
        let use_case = RunStageUseCase::new(services(critic));
        let mut stage = input(5);
        stage.params.convergence = ConvergencePolicy::UtilityPlateau;

        let outcome = use_case.execute(stage).await.unwrap();

        assert_eq!(outcome.round_count(), 2);
        assert_eq!(outcome.termination, StageTermination::Converged);
        assert!(outcome.has_winner());
    }

    #[tokio::test]
    async fn test_full_budget_ignores_plateau() {
        let critic = Arc::new(ScriptedCritic::new(|_| {
            Ok(scores(&[("novelty", 6.0), ("executability", 6.0), ("diversity", 6.0)]))
        }));
        let use_case = RunStageUseCase::new(services(critic));

        let outcome = use_case.execute(input(4)).await.unwrap();
        assert_eq!(outcome.round_count(), 4);
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let use_case = RunStageUseCase::new(services(favouring_second()));

        let mut no_agents = input(1);
        no_agents.agents.clear();
        assert_eq!(
            use_case.execute(no_agents).await.unwrap_err(),
            RunStageError::InvalidInput(DomainError::NoAgents)
        );

        let mut duplicate = input(1);
        duplicate.agents.push("Engineer-1".to_string());
        assert_eq!(
            use_case.execute(duplicate).await.unwrap_err(),
            RunStageError::InvalidInput(DomainError::DuplicateAgent("Engineer-1".to_string()))
        );

        assert_eq!(
            use_case.execute(input(0)).await.unwrap_err(),
            RunStageError::InvalidInput(DomainError::ZeroIterations)
        );

        let mut custom = input(1);
        custom.role = Role::Custom("Designer".to_string());
        assert_eq!(
            use_case.execute(custom).await.unwrap_err(),
            RunStageError::InvalidInput(DomainError::MissingGuideline("Designer".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transcript_events() {
        let logger = Arc::new(RecordingLogger::default());
        let use_case =
            RunStageUseCase::new(services(favouring_second()).with_logger(logger.clone()));

        use_case.execute(input(1)).await.unwrap();

        let types = logger.event_types();
        assert_eq!(types.first(), Some(&events::STAGE_STARTED));
        assert_eq!(types.last(), Some(&events::STAGE_COMPLETED));
        assert_eq!(logger.events_of(events::PROPOSAL_SUBMITTED).len(), 4);
        assert_eq!(logger.events_of(events::PROPOSAL_SCORED).len(), 4);
        assert_eq!(logger.events_of(events::FEEDBACK_ISSUED).len(), 3);

        let winner = &logger.events_of(events::WINNER_SELECTED)[0];
        assert_eq!(winner["owner"], "Engineer-2");
        assert_eq!(winner["role"], "engineer");
    }

    #[tokio::test]
    async fn test_trace_counts_refinements() {
        let use_case = RunStageUseCase::new(services(favouring_second()));

        let outcome = use_case.execute(input(3)).await.unwrap();
        let trace = outcome.trace();

        assert_eq!(trace.winner.as_deref(), Some("Engineer-2"));
        // 3 losers refine after rounds 1 and 2; their score never rises
        assert_eq!(trace.improvements, vec![false; 6]);
        assert_eq!(trace.insights_offered, 6);
    }
}
