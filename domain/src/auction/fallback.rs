//! Fallback policy for collaborator failures.
//!
//! Generation and critic calls return `Result<_, CollaboratorFailure>`. The
//! functions here turn that result into a value the coordination loop can
//! always use, keeping a record of the failure for logging and traces.

use super::weights::CriterionWeights;
use crate::core::error::CollaboratorFailure;
use crate::proposal::CriterionScores;

/// Guidance handed to a losing agent when feedback generation fails
pub const GENERIC_FEEDBACK: &str =
    "Improve clarity, feasibility, and innovation in your proposal based on peer comparison.";

/// Midpoint of the critic's 1-10 scale, used when scoring fails
pub const NEUTRAL_SCORE: f64 = 5.0;

/// A value produced either by the collaborator or by the fallback policy
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered<T> {
    pub value: T,
    /// The failure that forced the fallback, if any
    pub failure: Option<CollaboratorFailure>,
}

impl<T> Recovered<T> {
    pub fn delivered(value: T) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    pub fn fallback(value: T, failure: CollaboratorFailure) -> Self {
        Self {
            value,
            failure: Some(failure),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.failure.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Which agent operation a placeholder proposal stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalFallback {
    Initial,
    Refined,
    Evolved,
}

impl ProposalFallback {
    /// Tagged placeholder text for the given agent
    pub fn placeholder(&self, agent: &str) -> String {
        match self {
            ProposalFallback::Initial => format!("[Fallback] Initial proposal by {}", agent),
            ProposalFallback::Refined => format!("[Fallback] Refined draft by {}", agent),
            ProposalFallback::Evolved => format!("[Fallback] Evolved version by {}", agent),
        }
    }
}

/// Whether a proposal is a fallback placeholder
pub fn is_placeholder(content: &str) -> bool {
    content.starts_with("[Fallback]")
}

/// Generated proposal text, or the tagged placeholder.
///
/// Blank text counts as [`CollaboratorFailure::EmptyResponse`].
pub fn proposal_or_placeholder(
    result: Result<String, CollaboratorFailure>,
    kind: ProposalFallback,
    agent: &str,
) -> Recovered<String> {
    match non_blank(result) {
        Ok(text) => Recovered::delivered(text),
        Err(failure) => Recovered::fallback(kind.placeholder(agent), failure),
    }
}

/// Critic ratings, or every configured criterion at `neutral`
pub fn scores_or_neutral(
    result: Result<CriterionScores, CollaboratorFailure>,
    weights: &CriterionWeights,
    neutral: f64,
) -> Recovered<CriterionScores> {
    match result {
        Ok(scores) => Recovered::delivered(scores),
        Err(failure) => Recovered::fallback(weights.uniform_scores(neutral), failure),
    }
}

/// Critic feedback, or [`GENERIC_FEEDBACK`]
pub fn feedback_or_generic(result: Result<String, CollaboratorFailure>) -> Recovered<String> {
    match non_blank(result) {
        Ok(text) => Recovered::delivered(text),
        Err(failure) => Recovered::fallback(GENERIC_FEEDBACK.to_string(), failure),
    }
}

fn non_blank(result: Result<String, CollaboratorFailure>) -> Result<String, CollaboratorFailure> {
    let text = result?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(CollaboratorFailure::EmptyResponse)
    } else {
        Ok(trimmed.to_string())
    }
}
