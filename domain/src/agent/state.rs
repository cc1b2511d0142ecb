//! Agent proposal state

use crate::proposal::ProposalRecord;
use serde::{Deserialize, Serialize};

/// What an agent currently holds.
///
/// Content is replaced, never edited; every replacement bumps the version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgentState {
    /// No proposal generated yet
    #[default]
    Uninitialized,
    /// Latest proposal and its version (0 for the first)
    HasProposal { content: String, version: u32 },
}

impl AgentState {
    /// Replace the current proposal, returning the new version
    pub fn replace(&mut self, content: impl Into<String>) -> u32 {
        let version = match self {
            AgentState::Uninitialized => 0,
            AgentState::HasProposal { version, .. } => *version + 1,
        };
        *self = AgentState::HasProposal {
            content: content.into(),
            version,
        };
        version
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            AgentState::Uninitialized => None,
            AgentState::HasProposal { content, .. } => Some(content.as_str()),
        }
    }

    pub fn version(&self) -> Option<u32> {
        match self {
            AgentState::Uninitialized => None,
            AgentState::HasProposal { version, .. } => Some(*version),
        }
    }

    pub fn has_proposal(&self) -> bool {
        matches!(self, AgentState::HasProposal { .. })
    }

    /// A fresh, unscored record of the current proposal
    pub fn to_record(&self, owner: &str) -> Option<ProposalRecord> {
        match self {
            AgentState::Uninitialized => None,
            AgentState::HasProposal { content, version } => {
                Some(ProposalRecord::new(owner, content.clone(), *version))
            }
        }
    }
}
