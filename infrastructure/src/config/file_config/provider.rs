//! OpenAI-compatible endpoint configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Connection settings for the chat-completions endpoint
///
/// # Example
///
/// ```toml
/// [provider]
/// base_url = "http://localhost:8000/v1"   # vLLM, Ollama, or OpenAI
/// api_key_env = "OPENAI_API_KEY"
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Provider settings that cannot be used to build a gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("provider.timeout_secs must be at least 1")]
    ZeroTimeout,
}

impl FileProviderConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout);
        }
        Ok(())
    }

    /// API key from the configured environment variable, if set
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
