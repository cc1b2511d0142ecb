//! Pipeline parameters: which role groups run, in which order.

use auction_domain::Role;
use serde::{Deserialize, Serialize};

/// Role order and group size for a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Roles in stage order; each stage's winner feeds the next
    pub roles: Vec<Role>,
    /// Agents created per role group
    pub agents_per_role: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            roles: Role::pipeline(),
            agents_per_role: 4,
        }
    }
}

impl PipelineParams {
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_agents_per_role(mut self, agents: usize) -> Self {
        self.agents_per_role = agents;
        self
    }

    /// Agent names for one role group: `"{Role}-1"` .. `"{Role}-n"`
    pub fn agent_names(&self, role: &Role) -> Vec<String> {
        (1..=self.agents_per_role)
            .map(|i| role.agent_name(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline() {
        let params = PipelineParams::default();
        assert_eq!(params.roles.len(), 4);
        assert_eq!(params.roles[0], Role::ProductManager);
        assert_eq!(params.agents_per_role, 4);
    }

    #[test]
    fn test_agent_names() {
        let params = PipelineParams::default().with_agents_per_role(2);
        assert_eq!(
            params.agent_names(&Role::QaEngineer),
            vec!["QA Engineer-1".to_string(), "QA Engineer-2".to_string()]
        );
        assert!(params.with_agents_per_role(0).agent_names(&Role::Engineer).is_empty());
    }
}
