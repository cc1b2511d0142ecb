//! Application-level configuration.
//!
//! Parameter groups that control how use cases behave:
//!
//! - [`AuctionParams`]: round loop control (weights, budget, convergence)
//! - [`PipelineParams`]: which role groups run, and how large they are

pub mod auction_params;
pub mod pipeline_params;

pub use auction_params::AuctionParams;
pub use pipeline_params::PipelineParams;
