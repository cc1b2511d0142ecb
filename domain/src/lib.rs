//! Domain layer for agent-auction
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Auction
//!
//! Several agents of one role compete on the same task. Every round:
//!
//! - **Score**: a critic rates each proposal per criterion; the ratings are
//!   combined with configured weights into one scalar score
//! - **Select**: the highest-scoring proposal wins the round
//! - **Feedback**: every losing agent receives feedback contrasting its
//!   proposal with the winner, then refines
//!
//! ## Pipeline
//!
//! Stages run in role order (Product Manager → Architect → Engineer → QA
//! Engineer); the winning proposal of one stage becomes the task of the next.

pub mod agent;
pub mod auction;
pub mod config;
pub mod core;
pub mod metrics;
pub mod prompt;
pub mod proposal;
pub mod role;
pub mod stage;
pub mod util;

// Re-export commonly used types
pub use agent::{AgentState, Judgment, PeerEvaluation, PeerProposal, PeerSummary};
pub use auction::{CriterionWeights, ProposalFallback, Recovered, select_winner};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::{CollaboratorFailure, DomainError},
    model::Model,
    model_config::ModelConfig,
    task::TaskDescription,
};
pub use metrics::ProcessReport;
pub use prompt::PromptTemplate;
pub use proposal::{CriterionScores, ProposalPool, ProposalRecord};
pub use role::{EvaluationRubric, GuidelineStore, Role, RubricCriterion};
pub use stage::{
    ConvergencePolicy, FeedbackEntry, PipelineOutcome, RoundRecord, StageOutcome, StageTermination,
    StageTrace,
};
