//! Gateway-backed critic

use crate::ports::critic::Critic;
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use auction_domain::auction::parse_criterion_scores;
use auction_domain::{CollaboratorFailure, CriterionScores, Model, PromptTemplate};
use std::sync::Arc;
use tracing::debug;

/// [`Critic`] that asks an LLM for JSON ratings and free-text feedback
pub struct LlmCritic {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
}

impl LlmCritic {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self { gateway, model }
    }

    async fn ask(&self, system: &str, prompt: &str) -> Result<String, CollaboratorFailure> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, system)
            .await?;
        Ok(session.send(prompt).await?)
    }

    async fn rate(
        &self,
        content: &str,
        task: &str,
        criteria: &[String],
        peers: &[(String, String)],
    ) -> Result<CriterionScores, CollaboratorFailure> {
        let prompt = PromptTemplate::scoring_prompt(task, content, criteria, peers);
        let response = self.ask(PromptTemplate::scoring_system(), &prompt).await?;
        let scores = parse_criterion_scores(&response, criteria)?;
        debug!("Critic ratings: {:?}", scores);
        Ok(scores)
    }
}

#[async_trait]
impl Critic for LlmCritic {
    async fn score(
        &self,
        content: &str,
        task: &str,
        criteria: &[String],
    ) -> Result<CriterionScores, CollaboratorFailure> {
        self.rate(content, task, criteria, &[]).await
    }

    async fn score_with_peers(
        &self,
        content: &str,
        task: &str,
        criteria: &[String],
        peers: &[(String, String)],
    ) -> Result<CriterionScores, CollaboratorFailure> {
        self.rate(content, task, criteria, peers).await
    }

    async fn feedback(
        &self,
        losing: &str,
        winning: &str,
        task: &str,
    ) -> Result<String, CollaboratorFailure> {
        self.ask(
            PromptTemplate::feedback_system(),
            &PromptTemplate::feedback_prompt(task, winning, losing),
        )
        .await
    }
}
