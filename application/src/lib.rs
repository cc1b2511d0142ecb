//! Application layer for agent-auction
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod services;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{AuctionParams, PipelineParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    critic::Critic,
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, StageProgressNotifier},
    proposal_generator::ProposalGenerator,
};
pub use services::{Agent, AuctionCoordinator, LlmCritic, LlmProposalGenerator, OwnerEvaluation};
pub use use_cases::run_baseline::{BaselineMode, RunBaselineUseCase};
pub use use_cases::run_experiment::{
    ExperimentOutcome, RunExperimentError, RunExperimentInput, RunExperimentUseCase,
};
pub use use_cases::run_peer_evolution::RunPeerEvolutionUseCase;
pub use use_cases::run_pipeline::{RunPipelineError, RunPipelineInput, RunPipelineUseCase};
pub use use_cases::run_stage::{RunStageError, RunStageInput, RunStageUseCase};
pub use use_cases::shared::AuctionServices;
