//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These describe misuse or invalid configuration. Misbehaving collaborators
/// never produce a `DomainError`; see [`CollaboratorFailure`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("No agents configured for the stage")]
    NoAgents,

    #[error("Duplicate agent name in role group: {0}")]
    DuplicateAgent(String),

    #[error("Criterion weights must not be empty")]
    EmptyWeights,

    #[error("Weight for criterion '{criterion}' must be finite and non-negative, got {weight}")]
    NegativeWeight { criterion: String, weight: f64 },

    #[error("No guideline registered for role: {0}")]
    MissingGuideline(String),

    #[error("Agent {0} has no proposal yet")]
    NoProposal(String),

    #[error("Task description cannot be empty")]
    EmptyTask,

    #[error("Iteration budget must be at least 1")]
    ZeroIterations,
}

/// Failure of an external generation or critic call.
///
/// Always recovered locally by the fallback policy in
/// [`crate::auction::fallback`]; never fatal to a stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorFailure {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("collaborator timed out")]
    Timeout,

    #[error("malformed collaborator output: {0}")]
    MalformedOutput(String),

    #[error("collaborator returned an empty response")]
    EmptyResponse,
}

impl CollaboratorFailure {
    /// Whether the failure came from unparsable output rather than transport
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            CollaboratorFailure::MalformedOutput(_) | CollaboratorFailure::EmptyResponse
        )
    }
}
