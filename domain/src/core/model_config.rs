//! Capability model configuration.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Which model backs each external capability.
///
/// The generator writes, refines, and evolves proposals (and answers
/// peer-evaluation questions); the critic rates proposals and writes
/// feedback. Both default to the same model.
///
/// # Example
///
/// ```
/// use auction_domain::{Model, ModelConfig};
///
/// let config = ModelConfig::default().with_critic(Model::Gpt41);
/// assert_eq!(config.generator, Model::Gpt4o);
/// assert_eq!(config.critic, Model::Gpt41);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModelConfig {
    pub generator: Model,
    pub critic: Model,
}

impl ModelConfig {
    pub fn with_generator(mut self, model: Model) -> Self {
        self.generator = model;
        self
    }

    pub fn with_critic(mut self, model: Model) -> Self {
        self.critic = model;
        self
    }
}
