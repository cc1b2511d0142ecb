//! Progress notification port
//!
//! Defines the interface for reporting progress while stages run.

use auction_domain::{ProposalRecord, Role};

/// Callback for progress updates during stage execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain log lines, etc.)
pub trait StageProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, role: &Role, agents: usize, max_rounds: usize);

    /// Called when an agent has submitted its proposal for the current round
    fn on_proposal_ready(&self, role: &Role, agent: &str, fallback: bool);

    /// Called when a round has been scored and ranked
    fn on_round_complete(&self, role: &Role, round: usize, winner: Option<&ProposalRecord>);

    /// Called when a stage completes
    fn on_stage_complete(&self, role: &Role);

    /// Called when a round starts
    fn on_round_start(&self, _role: &Role, _round: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl StageProgressNotifier for NoProgress {
    fn on_stage_start(&self, _role: &Role, _agents: usize, _max_rounds: usize) {}
    fn on_proposal_ready(&self, _role: &Role, _agent: &str, _fallback: bool) {}
    fn on_round_complete(&self, _role: &Role, _round: usize, _winner: Option<&ProposalRecord>) {}
    fn on_stage_complete(&self, _role: &Role) {}
}
