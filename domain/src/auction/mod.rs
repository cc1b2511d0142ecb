//! Auction domain
//!
//! Pure building blocks of the scoring auction:
//!
//! - [`weights::CriterionWeights`] turns per-criterion ratings into one scalar score
//! - [`selection::select_winner`] picks the round winner deterministically
//! - [`parsing::parse_criterion_scores`] reads a critic's free-form rating reply
//! - [`fallback`] maps collaborator failures to their documented fallback values
//!
//! # Scoring
//!
//! ```text
//! score = Σ weight[c] * metrics.get(c, 0)   for c in configured criteria
//! ```
//!
//! Criteria the critic reports but the weights do not mention are ignored.

pub mod fallback;
pub mod parsing;
pub mod selection;
pub mod weights;

pub use fallback::{ProposalFallback, Recovered};
pub use parsing::parse_criterion_scores;
pub use selection::{rank_by_score, select_winner};
pub use weights::CriterionWeights;
