//! CLI entrypoint for Agent Auction
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use auction_application::{
    AuctionParams, AuctionServices, BaselineMode, LlmCritic, LlmGateway, LlmProposalGenerator,
    NoProgress, PipelineParams, RunBaselineUseCase, RunExperimentInput, RunExperimentUseCase,
    RunPeerEvolutionUseCase, RunPipelineInput, RunPipelineUseCase, RunStageInput,
    RunStageUseCase, StageProgressNotifier,
};
use auction_domain::{OutputFormat, Role, TaskDescription};
use auction_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiGateway};
use auction_presentation::{Cli, ConsoleFormatter, Mode, ProgressReporter};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let log_dir = cli.log_dir.clone().or_else(|| config.logging.dir.clone());
    let _guard = init_logging(cli.verbose, log_dir.as_deref());

    info!("Starting Agent Auction");
    ConsoleFormatter::set_color(!cli.no_color && config.output.color);

    // === Configuration ===
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue);
        } else {
            warn!("{}", issue);
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Configuration has {} error(s)", issues.iter().filter(|i| i.is_error()).count());
    }

    let auction = auction_params(&cli, &config);
    auction.validate().context("Invalid auction parameters")?;
    let pipeline = pipeline_params(&cli, &config);
    let (models, _) = config.models.to_model_config();
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    let tasks = cli
        .tasks
        .iter()
        .map(|t| TaskDescription::try_new(t.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid task description")?;

    // === Dependency Injection ===
    let gateway: Arc<dyn LlmGateway> = Arc::new(OpenAiGateway::from_config(&config.provider)?);
    let mut services = AuctionServices::new(
        Arc::new(LlmProposalGenerator::new(Arc::clone(&gateway), models.generator)),
        Arc::new(LlmCritic::new(gateway, models.critic)),
        Arc::new(config.to_guideline_store()),
    );
    if let Some(dir) = &log_dir {
        match JsonlConversationLogger::in_dir(dir) {
            Some(logger) => {
                info!("Transcript: {}", logger.path().display());
                services = services.with_logger(Arc::new(logger));
            }
            None => warn!("Transcript disabled: could not write to {}", dir.display()),
        }
    }

    let reporter;
    let progress: &dyn StageProgressNotifier = if cli.quiet || format == OutputFormat::Json {
        &NoProgress
    } else {
        reporter = ProgressReporter::new();
        &reporter
    };

    // === Dispatch ===
    let output = match cli.mode {
        Mode::Pipeline => match tasks.len() {
            1 => {
                let task = tasks.into_iter().next().context("Task is required")?;
                let input = RunPipelineInput::new(task)
                    .with_pipeline(pipeline)
                    .with_auction(auction);
                let outcome = RunPipelineUseCase::new(services)
                    .execute_with_progress(input, progress)
                    .await?;
                ConsoleFormatter::pipeline(&outcome, format)
            }
            _ => {
                let input = RunExperimentInput::new(tasks)
                    .with_pipeline(pipeline)
                    .with_auction(auction);
                let outcome = RunExperimentUseCase::new(services)
                    .execute_with_progress(input, progress)
                    .await?;
                ConsoleFormatter::experiment(&outcome, format)
            }
        },
        Mode::Stage => {
            let input = stage_input(&cli, tasks, &pipeline, auction)?;
            let outcome = RunStageUseCase::new(services)
                .execute_with_progress(input, progress)
                .await?;
            ConsoleFormatter::stage(&outcome, format)
        }
        Mode::Peer => {
            let input = stage_input(&cli, tasks, &pipeline, auction)?;
            let outcome = RunPeerEvolutionUseCase::new(services)
                .execute_with_progress(input, progress)
                .await?;
            ConsoleFormatter::stage(&outcome, format)
        }
        Mode::Naive => {
            let input = stage_input(&cli, tasks, &pipeline, auction)?;
            let outcome = RunBaselineUseCase::new(services)
                .execute_with_progress(input, BaselineMode::Naive, progress)
                .await?;
            ConsoleFormatter::stage(&outcome, format)
        }
        Mode::Isolated => {
            let input = stage_input(&cli, tasks, &pipeline, auction)?;
            let outcome = RunBaselineUseCase::new(services)
                .execute_with_progress(input, BaselineMode::Isolated, progress)
                .await?;
            ConsoleFormatter::stage(&outcome, format)
        }
    };

    println!("{}", output);

    Ok(())
}

/// Initialize tracing: stderr filtered by verbosity, plus a plain-text
/// `agent-auction.log` in `log_dir` when one is given
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, "agent-auction.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .with(file_layer)
        .init();

    guard
}

fn auction_params(cli: &Cli, config: &FileConfig) -> AuctionParams {
    let (mut params, _) = config.auction.to_params();
    if let Some(iterations) = cli.iterations {
        params = params.with_max_iterations(iterations);
    }
    if let Some(convergence) = cli.convergence {
        params = params.with_convergence(convergence.into());
    }
    if cli.peer_reviews {
        params = params.with_peer_reviews(true);
    }
    params
}

fn pipeline_params(cli: &Cli, config: &FileConfig) -> PipelineParams {
    let (mut params, _) = config.pipeline.to_params();
    if let Some(agents) = cli.agents {
        params = params.with_agents_per_role(agents);
    }
    params
}

/// Input for the single-stage modes: exactly one task, the `--role` group
fn stage_input(
    cli: &Cli,
    tasks: Vec<TaskDescription>,
    pipeline: &PipelineParams,
    auction: AuctionParams,
) -> Result<RunStageInput> {
    if tasks.len() > 1 {
        bail!(
            "{:?} mode takes exactly one task; pass several tasks only in pipeline mode",
            cli.mode
        );
    }
    let task = tasks.into_iter().next().context("Task is required")?;
    let role = Role::from(cli.role.as_str());
    let agents = pipeline.agent_names(&role);
    Ok(RunStageInput::new(role, task, agents).with_params(auction))
}
