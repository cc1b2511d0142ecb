//! OpenAI-compatible LLM Gateway implementation

use crate::config::FileProviderConfig;
use crate::openai::client::ChatClient;
use crate::openai::session::OpenAiSession;
use async_trait::async_trait;
use auction_application::{GatewayError, LlmGateway, LlmSession};
use auction_domain::Model;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// LLM Gateway for any OpenAI-compatible chat-completions server
pub struct OpenAiGateway {
    client: Arc<ChatClient>,
}

impl OpenAiGateway {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = ChatClient::new(base_url, api_key, timeout)?;
        info!("OpenAiGateway initialized for {}", client.base_url());
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Build from the `[provider]` config section, reading the API key from
    /// the configured environment variable
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Other(e.to_string()))?;

        let api_key = config.api_key();
        if api_key.is_none() {
            warn!(
                "{} is not set; sending requests without authorization",
                config.api_key_env
            );
        }

        Self::new(
            &config.base_url,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            Arc::clone(&self.client),
            model.clone(),
            None,
        )))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            Arc::clone(&self.client),
            model.clone(),
            Some(system_prompt),
        )))
    }
}
