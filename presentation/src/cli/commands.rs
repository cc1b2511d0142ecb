//! CLI command definitions

use auction_domain::ConvergencePolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for auction results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every round: proposals, scores, winners, and feedback
    Full,
    /// Only the final winning proposal
    Winner,
    /// JSON output
    Json,
}

impl From<OutputFormat> for auction_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => auction_domain::OutputFormat::Full,
            OutputFormat::Winner => auction_domain::OutputFormat::Winner,
            OutputFormat::Json => auction_domain::OutputFormat::Json,
        }
    }
}

/// How proposals are produced and ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Every role in order, each stage's winner feeding the next
    Pipeline,
    /// One auction stage for `--role`
    Stage,
    /// One stage where agents learn from each other instead of from feedback
    Peer,
    /// Single round: score once and pick the best
    Naive,
    /// Single round: collect proposals without ranking them
    Isolated,
}

/// Stopping rule override
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConvergenceArg {
    /// Always use the whole iteration budget
    Full,
    /// Stop once a round brings no improvement
    Plateau,
}

impl From<ConvergenceArg> for ConvergencePolicy {
    fn from(arg: ConvergenceArg) -> Self {
        match arg {
            ConvergenceArg::Full => ConvergencePolicy::FullBudget,
            ConvergenceArg::Plateau => ConvergencePolicy::UtilityPlateau,
        }
    }
}

/// CLI arguments for agent-auction
#[derive(Parser, Debug)]
#[command(name = "agent-auction")]
#[command(author, version, about = "Role groups of LLM agents compete in proposal auctions")]
#[command(long_about = r#"
Agent Auction runs groups of LLM agents that share a role. In every round each
agent submits a proposal, a critic scores them, the best one wins, and every
other agent gets feedback to refine its next attempt.

In pipeline mode the roles run in order (product manager, architect, engineer,
QA engineer by default) and each stage's winner becomes the next stage's task.
Passing several tasks runs one pipeline per task and reports process metrics
across all of them.

Configuration files are loaded from (in priority order):
1. AGENT_AUCTION_* environment variables
2. --config <path>     Explicit config file
3. ./auction.toml      Project-level config
4. ~/.config/agent-auction/config.toml   Global config

Example:
  agent-auction "Build a CLI todo app with due dates"
  agent-auction --mode stage --role architect -n 3 "Design a rate limiter"
  agent-auction --mode peer --peer-reviews "Write a URL shortener"
  agent-auction -o json "Task one" "Task two" "Task three"
"#)]
pub struct Cli {
    /// Task descriptions (several run as an experiment in pipeline mode)
    #[arg(value_name = "TASK", required_unless_present = "show_config")]
    pub tasks: Vec<String>,

    /// Run mode
    #[arg(short, long, value_enum, default_value = "pipeline")]
    pub mode: Mode,

    /// Role for single-stage modes (built-in or any role with a guideline)
    #[arg(short, long, default_value = "engineer")]
    pub role: String,

    /// Agents per role group
    #[arg(short = 'n', long, value_name = "N")]
    pub agents: Option<usize>,

    /// Maximum rounds per stage
    #[arg(short, long, value_name = "N")]
    pub iterations: Option<usize>,

    /// Stopping rule
    #[arg(long, value_enum)]
    pub convergence: Option<ConvergenceArg>,

    /// Collect rubric-based peer evaluations in peer mode
    #[arg(long)]
    pub peer_reviews: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Directory for the JSONL transcript and trace log
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
