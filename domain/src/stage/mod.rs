//! Stage domain
//!
//! A stage is the multi-round process in which one role group converges on a
//! single winning proposal. This module holds the stage's configuration
//! values, the per-round trace it leaves behind, and its outcome.

pub mod outcome;
pub mod policy;
pub mod trace;

pub use outcome::{PipelineOutcome, StageOutcome, StageTermination};
pub use policy::ConvergencePolicy;
pub use trace::{FeedbackEntry, RoundRecord, StageTrace};
