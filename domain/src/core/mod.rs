//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: LLM models backing the generation and critic capabilities
//! - [`model_config::ModelConfig`]: which model backs the generator and the critic
//! - [`task::TaskDescription`]: a validated task handed to a stage
//! - [`error::DomainError`]: domain-level errors
//! - [`error::CollaboratorFailure`]: recoverable failures of external capabilities

pub mod error;
pub mod model;
pub mod model_config;
pub mod task;
