//! Chat session over the completions endpoint.
//!
//! The endpoint is stateless, so [`OpenAiSession`] keeps the message history
//! itself and resends it with every request.

use crate::openai::client::ChatClient;
use crate::openai::protocol::ChatMessage;
use async_trait::async_trait;
use auction_application::{GatewayError, LlmSession};
use auction_domain::Model;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// A conversation with one model, optionally primed with a system prompt.
pub struct OpenAiSession {
    client: Arc<ChatClient>,
    model: Model,
    history: Mutex<Vec<ChatMessage>>,
}

impl OpenAiSession {
    pub fn new(client: Arc<ChatClient>, model: Model, system_prompt: Option<&str>) -> Self {
        let history = system_prompt
            .map(|prompt| vec![ChatMessage::system(prompt)])
            .unwrap_or_default();
        Self {
            client,
            model,
            history: Mutex::new(history),
        }
    }

    /// Number of messages sent or received so far (including the system prompt)
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let mut history = self.history.lock().await;
        history.push(ChatMessage::user(content));

        match self.client.complete(self.model.as_str(), &history).await {
            Ok(reply) => {
                debug!("{} replied with {} bytes", self.model, reply.len());
                history.push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                // Failed turns are not part of the conversation
                history.pop();
                Err(e)
            }
        }
    }
}
