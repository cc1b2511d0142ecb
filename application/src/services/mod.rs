//! Application services
//!
//! Stateful participants of the auction ([`Agent`], [`AuctionCoordinator`])
//! and the gateway-backed implementations of the generation and critic ports.

pub mod agent;
pub mod coordinator;
pub mod llm_critic;
pub mod llm_generator;

pub use agent::Agent;
pub use coordinator::{AuctionCoordinator, OwnerEvaluation};
pub use llm_critic::LlmCritic;
pub use llm_generator::LlmProposalGenerator;
