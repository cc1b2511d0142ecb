//! Proposal generation port
//!
//! The text-producing capability behind every agent. All operations are
//! fallible; the agent maps failures to tagged placeholders.

use async_trait::async_trait;
use auction_domain::{CollaboratorFailure, PeerSummary, Role, RubricCriterion};

/// Produces and revises proposal text on behalf of an agent
#[async_trait]
pub trait ProposalGenerator: Send + Sync {
    /// First proposal for a task, shaped by the role's guideline
    async fn generate(
        &self,
        role: &Role,
        agent: &str,
        guideline: &str,
        task: &str,
    ) -> Result<String, CollaboratorFailure>;

    /// New version of `previous` that addresses `feedback`
    async fn refine(
        &self,
        role: &Role,
        agent: &str,
        previous: &str,
        feedback: &str,
    ) -> Result<String, CollaboratorFailure>;

    /// New version of `previous` adopting strategies from stronger peers
    async fn evolve(
        &self,
        agent: &str,
        previous: &str,
        peers: &[PeerSummary],
    ) -> Result<String, CollaboratorFailure>;

    /// Free-text answer to one rubric question about a peer's proposal
    async fn evaluate(
        &self,
        role: &Role,
        proposal: &str,
        criterion: &RubricCriterion,
    ) -> Result<String, CollaboratorFailure>;
}
