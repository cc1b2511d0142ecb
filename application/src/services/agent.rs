//! Role agent
//!
//! An [`Agent`] owns one proposal lifecycle within a role group and talks to
//! the [`ProposalGenerator`] on its behalf. Generator failures never escape:
//! they become tagged placeholder proposals and are logged.

use crate::ports::proposal_generator::ProposalGenerator;
use auction_domain::agent::select_inspirations;
use auction_domain::auction::fallback::proposal_or_placeholder;
use auction_domain::{
    AgentState, CollaboratorFailure, DomainError, EvaluationRubric, Judgment, PeerEvaluation,
    PeerProposal, PeerSummary, ProposalFallback, ProposalRecord, Recovered, Role,
    agent::CriterionJudgment,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Number of peers an evolving agent learns from
const INSPIRATION_LIMIT: usize = 2;

/// Default bound on each peer summary handed to the generator
pub const DEFAULT_SUMMARY_CHARS: usize = 500;

/// A participant in one role group
pub struct Agent {
    name: String,
    role: Role,
    guideline: String,
    state: AgentState,
    generator: Arc<dyn ProposalGenerator>,
    summary_chars: usize,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        role: Role,
        guideline: impl Into<String>,
        generator: Arc<dyn ProposalGenerator>,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            guideline: guideline.into(),
            state: AgentState::default(),
            generator,
            summary_chars: DEFAULT_SUMMARY_CHARS,
        }
    }

    pub fn with_summary_chars(mut self, chars: usize) -> Self {
        self.summary_chars = chars;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn guideline(&self) -> &str {
        &self.guideline
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn current_proposal(&self) -> Option<&str> {
        self.state.content()
    }

    /// Unscored record of the current proposal
    pub fn record(&self) -> Option<ProposalRecord> {
        self.state.to_record(&self.name)
    }

    /// Write a proposal for `task` from the role's guideline.
    ///
    /// Replaces any earlier proposal, so a previous winner that regenerates
    /// moves to the next version.
    pub async fn generate_proposal(&mut self, task: &str) -> Recovered<ProposalRecord> {
        let result = self
            .generator
            .generate(&self.role, &self.name, &self.guideline, task)
            .await;
        self.adopt(result, ProposalFallback::Initial)
    }

    /// Revise the current proposal to address `feedback`
    pub async fn refine_proposal(
        &mut self,
        feedback: &str,
    ) -> Result<Recovered<ProposalRecord>, DomainError> {
        let previous = self.require_proposal()?.to_string();
        let result = self
            .generator
            .refine(&self.role, &self.name, &previous, feedback)
            .await;
        Ok(self.adopt(result, ProposalFallback::Refined))
    }

    /// Revise the current proposal by learning from the two best-scored peers.
    ///
    /// Only the first `summary_chars` characters of each peer are shown to
    /// the generator. Without any scored peer the content is kept as is and
    /// only the version advances.
    pub async fn evolve_from_peers(
        &mut self,
        peers: &[PeerProposal],
        scores: &HashMap<String, f64>,
    ) -> Result<Recovered<ProposalRecord>, DomainError> {
        let previous = self.require_proposal()?.to_string();

        let summaries: Vec<PeerSummary> =
            select_inspirations(peers, scores, &self.name, INSPIRATION_LIMIT)
                .into_iter()
                .map(|peer| PeerSummary::of(peer, self.summary_chars))
                .collect();

        if summaries.is_empty() {
            debug!("Agent {} has no peers to learn from", self.name);
            return Ok(Recovered::delivered(self.replace_proposal(previous)));
        }

        debug!(
            "Agent {} evolving from {}",
            self.name,
            summaries
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        let result = self.generator.evolve(&self.name, &previous, &summaries).await;
        Ok(self.adopt(result, ProposalFallback::Evolved))
    }

    /// Judge every other peer against the role's rubric.
    ///
    /// A failed call is kept as a failed judgment for that criterion; the
    /// remaining criteria and peers are still evaluated.
    pub async fn evaluate_peers(&self, peers: &[PeerProposal]) -> Vec<PeerEvaluation> {
        let rubric = EvaluationRubric::for_role(&self.role);
        let mut evaluations = Vec::new();

        for peer in peers.iter().filter(|p| p.name != self.name) {
            let mut judgments = Vec::with_capacity(rubric.criteria().len());
            for criterion in rubric.criteria() {
                let result = self
                    .generator
                    .evaluate(&self.role, &peer.content, criterion)
                    .await;
                let judgment = Judgment::from_result(result);
                if let Judgment::Failed(reason) = &judgment {
                    warn!(
                        "Agent {} could not evaluate {} on {}: {}",
                        self.name, peer.name, criterion.name, reason
                    );
                }
                judgments.push(CriterionJudgment {
                    criterion: criterion.name.to_string(),
                    judgment,
                });
            }
            evaluations.push(PeerEvaluation {
                evaluator: self.name.clone(),
                peer: peer.name.clone(),
                judgments,
            });
        }

        evaluations
    }

    fn require_proposal(&self) -> Result<&str, DomainError> {
        self.state
            .content()
            .ok_or_else(|| DomainError::NoProposal(self.name.clone()))
    }

    fn adopt(
        &mut self,
        result: Result<String, CollaboratorFailure>,
        kind: ProposalFallback,
    ) -> Recovered<ProposalRecord> {
        let recovered = proposal_or_placeholder(result, kind, &self.name);
        if let Some(failure) = &recovered.failure {
            warn!("Agent {} fell back to a placeholder: {}", self.name, failure);
        }
        Recovered {
            value: self.replace_proposal(recovered.value),
            failure: recovered.failure,
        }
    }

    fn replace_proposal(&mut self, content: String) -> ProposalRecord {
        let version = self.state.replace(content.clone());
        ProposalRecord::new(self.name.as_str(), content, version)
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("state", &self.state)
            .finish()
    }
}
