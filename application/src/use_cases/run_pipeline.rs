//! Run Pipeline use case
//!
//! Runs one auction stage per role, in order. Each stage's winning content
//! becomes the task of the next stage.

use super::run_stage::{RunStageError, RunStageInput, RunStageUseCase};
use super::shared::AuctionServices;
use crate::config::{AuctionParams, PipelineParams};
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use auction_domain::{PipelineOutcome, Role, TaskDescription};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during pipeline execution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunPipelineError {
    #[error("Pipeline has no roles")]
    NoRoles,

    #[error("{role} stage failed: {source}")]
    Stage {
        role: Role,
        #[source]
        source: RunStageError,
    },
}

/// Input for the RunPipeline use case
#[derive(Debug, Clone)]
pub struct RunPipelineInput {
    pub task: TaskDescription,
    pub pipeline: PipelineParams,
    pub auction: AuctionParams,
}

impl RunPipelineInput {
    pub fn new(task: TaskDescription) -> Self {
        Self {
            task,
            pipeline: PipelineParams::default(),
            auction: AuctionParams::default(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: PipelineParams) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_auction(mut self, auction: AuctionParams) -> Self {
        self.auction = auction;
        self
    }
}

/// Use case for running the role pipeline on one task
pub struct RunPipelineUseCase {
    stage: RunStageUseCase,
}

impl RunPipelineUseCase {
    pub fn new(services: AuctionServices) -> Self {
        Self {
            stage: RunStageUseCase::new(services),
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunPipelineInput,
    ) -> Result<PipelineOutcome, RunPipelineError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunPipelineInput,
        progress: &dyn StageProgressNotifier,
    ) -> Result<PipelineOutcome, RunPipelineError> {
        if input.pipeline.roles.is_empty() {
            return Err(RunPipelineError::NoRoles);
        }

        let original = input.task.content().to_string();
        let mut task = input.task;
        let mut stages = Vec::with_capacity(input.pipeline.roles.len());

        for role in &input.pipeline.roles {
            let stage_failed = |source: RunStageError| RunPipelineError::Stage {
                role: role.clone(),
                source,
            };

            let stage_input = RunStageInput::new(
                role.clone(),
                task.clone(),
                input.pipeline.agent_names(role),
            )
            .with_params(input.auction.clone());
            let outcome = self
                .stage
                .execute_with_progress(stage_input, progress)
                .await
                .map_err(stage_failed)?;
            info!(
                "{} stage finished after {} rounds ({})",
                role,
                outcome.round_count(),
                outcome.termination
            );

            task = TaskDescription::try_new(outcome.output.as_str())
                .map_err(|e| stage_failed(e.into()))?;
            stages.push(outcome);
        }

        Ok(PipelineOutcome {
            task: original,
            stages,
        })
    }
}
