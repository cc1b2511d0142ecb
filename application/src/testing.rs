//! Scripted test doubles for the application ports

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::critic::Critic;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::proposal_generator::ProposalGenerator;
use async_trait::async_trait;
use auction_domain::{
    CollaboratorFailure, CriterionScores, Model, PeerSummary, Role, RubricCriterion,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn scores(entries: &[(&str, f64)]) -> CriterionScores {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

// ==================== Gateway ====================

struct MockState {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    exchanges: Mutex<Vec<(String, String)>>,
}

/// Gateway whose sessions pop queued responses and record each exchange
pub struct MockGateway {
    state: Arc<MockState>,
}

impl MockGateway {
    pub fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            state: Arc::new(MockState {
                responses: Mutex::new(VecDeque::from(responses)),
                exchanges: Mutex::new(Vec::new()),
            }),
        }
    }

    /// `(system_prompt, prompt)` of the most recent send
    pub fn last_exchange(&self) -> Option<(String, String)> {
        self.state.exchanges.lock().unwrap().last().cloned()
    }
}

struct MockSession {
    model: Model,
    system_prompt: String,
    state: Arc<MockState>,
}

#[async_trait]
impl LlmSession for MockSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.state
            .exchanges
            .lock()
            .unwrap()
            .push((self.system_prompt.clone(), content.to_string()));
        self.state
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.create_session_with_system_prompt(model, "").await
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(MockSession {
            model: model.clone(),
            system_prompt: system_prompt.to_string(),
            state: Arc::clone(&self.state),
        }))
    }
}

// ==================== Generator ====================

/// Deterministic generator.
///
/// - generate: `"{agent}: proposal for {task}"`
/// - refine: previous content plus `"\n[revised: {feedback}]"`
/// - evolve: previous content plus `"\n[learned from {peers}]"`
pub struct ScriptedGenerator {
    fail_all: bool,
    failing_criterion: Option<String>,
    calls: AtomicUsize,
    last_summaries: Mutex<Vec<PeerSummary>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            fail_all: false,
            failing_criterion: None,
            calls: AtomicUsize::new(0),
            last_summaries: Mutex::new(Vec::new()),
        }
    }

    /// Generator whose every call fails
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new()
        }
    }

    pub fn with_failing_criterion(mut self, criterion: &str) -> Self {
        self.failing_criterion = Some(criterion.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_summaries(&self) -> Vec<PeerSummary> {
        self.last_summaries.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), CollaboratorFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            Err(CollaboratorFailure::Unavailable("scripted failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProposalGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _role: &Role,
        agent: &str,
        _guideline: &str,
        task: &str,
    ) -> Result<String, CollaboratorFailure> {
        self.check()?;
        Ok(format!("{}: proposal for {}", agent, task))
    }

    async fn refine(
        &self,
        _role: &Role,
        _agent: &str,
        previous: &str,
        feedback: &str,
    ) -> Result<String, CollaboratorFailure> {
        self.check()?;
        Ok(format!("{}\n[revised: {}]", previous, feedback))
    }

    async fn evolve(
        &self,
        _agent: &str,
        previous: &str,
        peers: &[PeerSummary],
    ) -> Result<String, CollaboratorFailure> {
        self.check()?;
        *self.last_summaries.lock().unwrap() = peers.to_vec();
        let names = peers
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("{}\n[learned from {}]", previous, names))
    }

    async fn evaluate(
        &self,
        _role: &Role,
        _proposal: &str,
        criterion: &RubricCriterion,
    ) -> Result<String, CollaboratorFailure> {
        self.check()?;
        if self.failing_criterion.as_deref() == Some(criterion.name) {
            return Err(CollaboratorFailure::Timeout);
        }
        Ok(format!("{} is adequate", criterion.name))
    }
}

// ==================== Critics ====================

type Scorer = dyn Fn(&str) -> Result<CriterionScores, CollaboratorFailure> + Send + Sync;

/// Critic that rates content with a closure and returns fixed feedback
pub struct ScriptedCritic {
    scorer: Box<Scorer>,
    feedback: String,
    peer_counts: Mutex<Vec<usize>>,
    feedback_calls: AtomicUsize,
}

impl ScriptedCritic {
    pub fn new(
        scorer: impl Fn(&str) -> Result<CriterionScores, CollaboratorFailure> + Send + Sync + 'static,
    ) -> Self {
        Self {
            scorer: Box::new(scorer),
            feedback: "- Follow the winner's structure".to_string(),
            peer_counts: Mutex::new(Vec::new()),
            feedback_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_feedback(mut self, feedback: &str) -> Self {
        self.feedback = feedback.to_string();
        self
    }

    /// Number of peers visible in each `score_with_peers` call
    pub fn peer_counts(&self) -> Vec<usize> {
        self.peer_counts.lock().unwrap().clone()
    }

    pub fn feedback_calls(&self) -> usize {
        self.feedback_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Critic for ScriptedCritic {
    async fn score(
        &self,
        content: &str,
        _task: &str,
        _criteria: &[String],
    ) -> Result<CriterionScores, CollaboratorFailure> {
        (self.scorer)(content)
    }

    async fn score_with_peers(
        &self,
        content: &str,
        task: &str,
        criteria: &[String],
        peers: &[(String, String)],
    ) -> Result<CriterionScores, CollaboratorFailure> {
        self.peer_counts.lock().unwrap().push(peers.len());
        self.score(content, task, criteria).await
    }

    async fn feedback(
        &self,
        _losing: &str,
        _winning: &str,
        _task: &str,
    ) -> Result<String, CollaboratorFailure> {
        self.feedback_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.feedback.clone())
    }
}

/// Critic whose every call fails
pub struct FailingCritic;

#[async_trait]
impl Critic for FailingCritic {
    async fn score(
        &self,
        _content: &str,
        _task: &str,
        _criteria: &[String],
    ) -> Result<CriterionScores, CollaboratorFailure> {
        Err(CollaboratorFailure::Unavailable("critic offline".to_string()))
    }

    async fn feedback(
        &self,
        _losing: &str,
        _winning: &str,
        _task: &str,
    ) -> Result<String, CollaboratorFailure> {
        Err(CollaboratorFailure::Timeout)
    }
}

// ==================== Logger ====================

/// Logger that keeps every event in memory
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }

    pub fn events_of(&self, event_type: &str) -> Vec<serde_json::Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .map(|e| e.payload.clone())
            .collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event);
    }
}
