//! Run Experiment use case
//!
//! Runs the role pipeline for many independent tasks concurrently and
//! computes the process metrics over every stage they produced.

use super::run_pipeline::{RunPipelineError, RunPipelineInput, RunPipelineUseCase};
use super::shared::AuctionServices;
use crate::config::{AuctionParams, PipelineParams};
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use auction_domain::{PipelineOutcome, ProcessReport, TaskDescription};
use futures::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during an experiment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunExperimentError {
    #[error("No tasks given")]
    NoTasks,

    #[error("Task {index} failed: {source}")]
    Pipeline {
        index: usize,
        #[source]
        source: RunPipelineError,
    },
}

/// Input for the RunExperiment use case
#[derive(Debug, Clone)]
pub struct RunExperimentInput {
    pub tasks: Vec<TaskDescription>,
    pub pipeline: PipelineParams,
    pub auction: AuctionParams,
}

impl RunExperimentInput {
    pub fn new(tasks: Vec<TaskDescription>) -> Self {
        Self {
            tasks,
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

/// All pipelines of an experiment and the metrics over them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentOutcome {
    /// One pipeline per task, in task order
    pub pipelines: Vec<PipelineOutcome>,
    pub report: ProcessReport,
}

/// Use case for running the pipeline over many tasks
pub struct RunExperimentUseCase {
    services: AuctionServices,
}

impl RunExperimentUseCase {
    pub fn new(services: AuctionServices) -> Self {
        Self { services }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunExperimentInput,
    ) -> Result<ExperimentOutcome, RunExperimentError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Pipelines share no mutable state; each gets its own agents and pools.
    pub async fn execute_with_progress(
        &self,
        input: RunExperimentInput,
        progress: &dyn StageProgressNotifier,
    ) -> Result<ExperimentOutcome, RunExperimentError> {
        if input.tasks.is_empty() {
            return Err(RunExperimentError::NoTasks);
        }
        info!("Starting experiment over {} tasks", input.tasks.len());

        let runs = input.tasks.into_iter().map(|task| {
            let use_case = RunPipelineUseCase::new(self.services.clone());
            let pipeline_input = RunPipelineInput::new(task)
                .with_pipeline(input.pipeline.clone())
                .with_auction(input.auction.clone());
            async move {
                use_case
                    .execute_with_progress(pipeline_input, progress)
                    .await
            }
        });

        let mut pipelines = Vec::new();
        for (index, result) in join_all(runs).await.into_iter().enumerate() {
            let outcome =
                result.map_err(|source| RunExperimentError::Pipeline { index, source })?;
            pipelines.push(outcome);
        }

        let traces: Vec<_> = pipelines.iter().flat_map(|p| p.traces()).collect();
        let report = ProcessReport::from_traces(&traces);
        info!(
            "Experiment finished: entropy {:.3}, responsiveness {:.3}, utilization {:.3}",
            report.task_ownership_entropy,
            report.adaptation_responsiveness_rate,
            report.feedback_utilization_score
        );

        Ok(ExperimentOutcome { pipelines, report })
    }
}
