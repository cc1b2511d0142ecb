//! Critic port
//!
//! Rates proposals per criterion and writes improvement feedback. Failures
//! are recovered by the coordinator (neutral scores, generic feedback).

use async_trait::async_trait;
use auction_domain::{CollaboratorFailure, CriterionScores};

/// Scores proposals and explains how losers can improve
#[async_trait]
pub trait Critic: Send + Sync {
    /// Rate `content` on each of `criteria`
    async fn score(
        &self,
        content: &str,
        task: &str,
        criteria: &[String],
    ) -> Result<CriterionScores, CollaboratorFailure>;

    /// Rate `content` with the other proposals of its round visible.
    ///
    /// `peers` holds `(owner, content)` pairs. Critics without a use for the
    /// context rate the proposal alone.
    async fn score_with_peers(
        &self,
        content: &str,
        task: &str,
        criteria: &[String],
        _peers: &[(String, String)],
    ) -> Result<CriterionScores, CollaboratorFailure> {
        self.score(content, task, criteria).await
    }

    /// Guidance for a losing proposal, contrasted with the winner
    async fn feedback(
        &self,
        losing: &str,
        winning: &str,
        task: &str,
    ) -> Result<String, CollaboratorFailure>;
}
