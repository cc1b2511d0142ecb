//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application
//! parameters with every problem collected as a [`ConfigIssue`].

mod auction;
mod models;
mod output;
mod pipeline;
mod provider;

pub use auction::FileAuctionConfig;
pub use models::FileModelsConfig;
pub use output::{FileLoggingConfig, FileOutputConfig};
pub use pipeline::FilePipelineConfig;
pub use provider::{ConfigValidationError, FileProviderConfig};

use auction_domain::{ConfigIssue, ConfigIssueCode, GuidelineStore, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Auction weights, budget, and convergence
    pub auction: FileAuctionConfig,
    /// Role order and group size
    pub pipeline: FilePipelineConfig,
    /// Generator and critic model selection
    pub models: FileModelsConfig,
    /// Chat-completions endpoint
    pub provider: FileProviderConfig,
    /// Role name → guideline (SOP) text, overriding or extending the built-ins
    pub guidelines: BTreeMap<String, String>,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript location
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.auction.to_params().1);
        issues.extend(self.pipeline.to_params().1);
        issues.extend(self.models.to_model_config().1);

        let store = self.to_guideline_store();
        for role in self.pipeline.parse_roles() {
            if !store.contains(&role) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingGuideline {
                        role: role.config_key(),
                    },
                    format!(
                        "pipeline.roles: role '{}' has no entry in [guidelines]",
                        role
                    ),
                ));
            }
        }

        issues
    }

    /// Built-in guidelines with the configured ones layered on top
    pub fn to_guideline_store(&self) -> GuidelineStore {
        self.guidelines
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .fold(GuidelineStore::with_defaults(), |store, (name, text)| {
                store.with_guideline(Role::from(name.as_str()), text.as_str())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_domain::{ConvergencePolicy, Model, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[auction]
max_iterations = 3
convergence = "utility_plateau"
peer_reviews = true

[auction.weights]
novelty = 0.5
executability = 0.5

[pipeline]
roles = ["architect", "engineer"]
agents_per_role = 2

[models]
generator = "gpt-4.1"
critic = "gpt-4o-mini"

[provider]
base_url = "http://localhost:8000/v1"
timeout_secs = 30

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());

        let (auction, _) = config.auction.to_params();
        assert_eq!(auction.max_iterations, 3);
        assert_eq!(auction.convergence, ConvergencePolicy::UtilityPlateau);
        assert_eq!(auction.weights.len(), 2);
        assert!(auction.peer_reviews);

        let (pipeline, _) = config.pipeline.to_params();
        assert_eq!(pipeline.roles, vec![Role::Architect, Role::Engineer]);
        assert_eq!(pipeline.agents_per_role, 2);

        let (models, _) = config.models.to_model_config();
        assert_eq!(models.generator, Model::Gpt41);
        assert_eq!(models.critic, Model::Gpt4oMini);

        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[auction]
max_iterations = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.auction.max_iterations, 2);
        // Defaults should apply
        assert_eq!(config.auction.convergence, "full_budget");
        assert_eq!(config.pipeline.roles.len(), 4);
        assert_eq!(config.provider.base_url, "https://api.openai.com/v1");
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_custom_role_requires_guideline() {
        let toml_str = r#"
[pipeline]
roles = ["engineer", "security_reviewer"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::MissingGuideline {
                role: "security_reviewer".to_string()
            }
        );

        let toml_str = r#"
[pipeline]
roles = ["engineer", "security_reviewer"]

[guidelines]
security_reviewer = "Review the code for injection and auth flaws."
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_guideline_override() {
        let toml_str = r#"
[guidelines]
architect = "Draw one diagram, nothing else."
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let store = config.to_guideline_store();
        assert_eq!(
            store.get(&Role::Architect),
            Some("Draw one diagram, nothing else.")
        );
        assert!(store.contains(&Role::QaEngineer));
    }

    #[test]
    fn test_collects_issues_from_every_section() {
        let toml_str = r#"
[auction]
max_iterations = 0
convergence = "sometimes"

[pipeline]
agents_per_role = 0

[models]
critic = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 3);
    }
}
