//! Capability model configuration from TOML (`[models]` section)

use auction_domain::{ConfigIssue, ConfigIssueCode, Model, ModelConfig};
use serde::{Deserialize, Serialize};

/// Model selection per capability
///
/// # Example
///
/// ```toml
/// [models]
/// generator = "gpt-4o"        # writes, refines, and evolves proposals
/// critic = "gpt-4.1-mini"     # scores proposals and writes feedback
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub generator: Option<String>,
    pub critic: Option<String>,
}

impl FileModelsConfig {
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: field.to_string(),
                    },
                    format!("models.{}: model name cannot be empty", field),
                )],
            ),
            Some(s) => (Some(Model::from(s.trim())), Vec::new()),
        }
    }

    pub fn parse_generator(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("generator", self.generator.as_ref())
    }

    pub fn parse_critic(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("critic", self.critic.as_ref())
    }

    /// Merge configured models over the defaults
    pub fn to_model_config(&self) -> (ModelConfig, Vec<ConfigIssue>) {
        let mut config = ModelConfig::default();
        let (generator, mut issues) = self.parse_generator();
        let (critic, critic_issues) = self.parse_critic();
        issues.extend(critic_issues);

        if let Some(model) = generator {
            config = config.with_generator(model);
        }
        if let Some(model) = critic {
            config = config.with_critic(model);
        }
        (config, issues)
    }
}
