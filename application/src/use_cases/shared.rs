//! Shared helpers for the stage use cases

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, events,
};
use crate::ports::critic::Critic;
use crate::ports::proposal_generator::ProposalGenerator;
use crate::services::Agent;
use auction_domain::metrics::diversity;
use auction_domain::{DomainError, GuidelineStore, ProposalRecord, Role};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;

/// Collaborators every stage use case needs.
///
/// Cheap to clone; independent stages may each hold a copy and run
/// concurrently.
#[derive(Clone)]
pub struct AuctionServices {
    pub generator: Arc<dyn ProposalGenerator>,
    pub critic: Arc<dyn Critic>,
    pub guidelines: Arc<GuidelineStore>,
    pub logger: Arc<dyn ConversationLogger>,
}

impl AuctionServices {
    pub fn new(
        generator: Arc<dyn ProposalGenerator>,
        critic: Arc<dyn Critic>,
        guidelines: Arc<GuidelineStore>,
    ) -> Self {
        Self {
            generator,
            critic,
            guidelines,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub(crate) fn log(&self, event_type: &'static str, payload: Value) {
        self.logger.log(ConversationEvent::new(event_type, payload));
    }

    /// Create one agent per name, all sharing the role's guideline
    pub(crate) fn build_agents(
        &self,
        role: &Role,
        names: &[String],
        summary_chars: usize,
    ) -> Result<Vec<Agent>, DomainError> {
        validate_agent_names(names)?;
        let guideline = self.guidelines.require(role)?;
        Ok(names
            .iter()
            .map(|name| {
                Agent::new(
                    name.as_str(),
                    role.clone(),
                    guideline,
                    Arc::clone(&self.generator),
                )
                .with_summary_chars(summary_chars)
            })
            .collect())
    }

    pub(crate) fn log_submission(
        &self,
        role: &Role,
        round: usize,
        record: &ProposalRecord,
        fallback: bool,
    ) {
        self.log(
            events::PROPOSAL_SUBMITTED,
            json!({
                "role": role,
                "round": round,
                "owner": record.owner,
                "version": record.version,
                "content": record.content,
                "fallback": fallback,
            }),
        );
    }

    pub(crate) fn log_scores(&self, role: &Role, round: usize, records: &[ProposalRecord]) {
        for record in records {
            self.log(
                events::PROPOSAL_SCORED,
                json!({
                    "role": role,
                    "round": round,
                    "owner": record.owner,
                    "score": record.score,
                    "metrics": record.metrics,
                }),
            );
        }
    }
}

/// Agent names must be present and unique within a group
pub(crate) fn validate_agent_names(names: &[String]) -> Result<(), DomainError> {
    if names.is_empty() {
        return Err(DomainError::NoAgents);
    }
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(DomainError::DuplicateAgent(name.clone()));
        }
    }
    Ok(())
}

/// Mean pairwise text diversity of a round's proposals
pub(crate) fn pool_diversity(records: &[ProposalRecord]) -> f64 {
    let contents: Vec<&str> = records.iter().map(|r| r.content.as_str()).collect();
    diversity(&contents)
}
