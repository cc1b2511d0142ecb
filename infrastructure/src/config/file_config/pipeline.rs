//! Pipeline configuration from TOML (`[pipeline]` section)

use auction_application::PipelineParams;
use auction_domain::{ConfigIssue, ConfigIssueCode, Role};
use serde::{Deserialize, Serialize};

/// Raw pipeline configuration from TOML
///
/// # Example
///
/// ```toml
/// [pipeline]
/// roles = ["product_manager", "architect", "engineer", "qa_engineer"]
/// agents_per_role = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Role names in stage order. Unknown names become custom roles.
    pub roles: Vec<String>,
    /// Agents per role group
    pub agents_per_role: usize,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        let defaults = PipelineParams::default();
        Self {
            roles: defaults.roles.iter().map(Role::config_key).collect(),
            agents_per_role: defaults.agents_per_role,
        }
    }
}

impl FilePipelineConfig {
    /// Roles in stage order
    pub fn parse_roles(&self) -> Vec<Role> {
        self.roles
            .iter()
            .filter(|r| !r.trim().is_empty())
            .map(|r| Role::from(r.as_str()))
            .collect()
    }

    pub fn to_params(&self) -> (PipelineParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let roles = self.parse_roles();

        if roles.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyPipeline,
                "pipeline.roles must name at least one role",
            ));
        }
        if self.agents_per_role == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroAgents,
                "pipeline.agents_per_role must be at least 1",
            ));
        }

        let params = PipelineParams::default()
            .with_roles(roles)
            .with_agents_per_role(self.agents_per_role);
        (params, issues)
    }
}
