//! Proposal domain
//!
//! A [`ProposalRecord`] is one agent's submission for a round; a
//! [`ProposalPool`] collects the competing records of one round of one stage.
//!
//! Records are replaced, never edited, when an agent refines: each
//! refinement produces a new record with a higher version. The only field
//! written after creation is the score/metrics pair, set by the coordinator.

pub mod pool;
pub mod record;

pub use pool::ProposalPool;
pub use record::{CriterionScores, ProposalRecord};
