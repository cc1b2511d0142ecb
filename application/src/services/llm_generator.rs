//! Gateway-backed proposal generator

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::proposal_generator::ProposalGenerator;
use async_trait::async_trait;
use auction_domain::{CollaboratorFailure, Model, PeerSummary, PromptTemplate, Role, RubricCriterion};
use std::sync::Arc;
use tracing::debug;

/// [`ProposalGenerator`] that prompts an LLM through the gateway
pub struct LlmProposalGenerator {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
}

impl LlmProposalGenerator {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self { gateway, model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    async fn ask(&self, system: &str, prompt: &str) -> Result<String, CollaboratorFailure> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, system)
            .await?;
        let response = session.send(prompt).await?;
        debug!("{} returned {} chars", self.model, response.len());
        Ok(response)
    }
}

#[async_trait]
impl ProposalGenerator for LlmProposalGenerator {
    async fn generate(
        &self,
        role: &Role,
        agent: &str,
        guideline: &str,
        task: &str,
    ) -> Result<String, CollaboratorFailure> {
        self.ask(
            &PromptTemplate::generation_system(role, agent),
            &PromptTemplate::generation_prompt(task, guideline),
        )
        .await
    }

    async fn refine(
        &self,
        role: &Role,
        agent: &str,
        previous: &str,
        feedback: &str,
    ) -> Result<String, CollaboratorFailure> {
        self.ask(
            &PromptTemplate::refinement_system(role, agent),
            &PromptTemplate::refinement_prompt(previous, feedback),
        )
        .await
    }

    async fn evolve(
        &self,
        _agent: &str,
        previous: &str,
        peers: &[PeerSummary],
    ) -> Result<String, CollaboratorFailure> {
        self.ask(
            PromptTemplate::evolution_system(),
            &PromptTemplate::evolution_prompt(previous, peers),
        )
        .await
    }

    async fn evaluate(
        &self,
        role: &Role,
        proposal: &str,
        criterion: &RubricCriterion,
    ) -> Result<String, CollaboratorFailure> {
        self.ask(
            &PromptTemplate::peer_evaluation_system(role),
            &PromptTemplate::peer_evaluation_prompt(proposal, criterion),
        )
        .await
    }
}
