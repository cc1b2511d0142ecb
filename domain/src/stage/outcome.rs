//! Results of running stages and pipelines

use super::policy::ConvergencePolicy;
use super::trace::{RoundRecord, StageTrace};
use crate::proposal::ProposalRecord;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// How a stage's round loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageTermination {
    /// Every round of the budget ran
    BudgetExhausted,
    /// No agent improved its score in the last round
    Converged,
    /// A round produced no winner; the output is the task description
    NoWinner,
    /// Proposals were collected but never ranked
    Unranked,
}

impl StageTermination {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageTermination::BudgetExhausted => "budget_exhausted",
            StageTermination::Converged => "converged",
            StageTermination::NoWinner => "no_winner",
            StageTermination::Unranked => "unranked",
        }
    }
}

impl std::fmt::Display for StageTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of one stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub role: Role,
    /// The task the stage worked on
    pub task: String,
    /// Winning content, or `task` when no winner was found
    pub output: String,
    /// The final round's winning record
    pub winner: Option<ProposalRecord>,
    pub rounds: Vec<RoundRecord>,
    pub convergence: ConvergencePolicy,
    pub termination: StageTermination,
}

impl StageOutcome {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }

    /// Trace consumed by the process metrics
    pub fn trace(&self) -> StageTrace {
        StageTrace::from_rounds(&self.rounds)
    }
}

/// The result of running stages in role order, each fed the previous output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// The task handed to the first stage
    pub task: String,
    pub stages: Vec<StageOutcome>,
}

impl PipelineOutcome {
    /// Output of the last stage, or the task when no stage ran
    pub fn final_output(&self) -> &str {
        self.stages
            .last()
            .map(|s| s.output.as_str())
            .unwrap_or(self.task.as_str())
    }

    pub fn traces(&self) -> Vec<StageTrace> {
        self.stages.iter().map(StageOutcome::trace).collect()
    }
}
