//! Task description value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The task a stage works on (Value Object)
///
/// For the first stage of a pipeline this is the user's request; later
/// stages receive the previous stage's winning proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescription {
    content: String,
}

impl TaskDescription {
    /// Create a task description, rejecting empty or whitespace-only text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyTask)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the task content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
