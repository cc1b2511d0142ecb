//! Agent domain module
//!
//! Pure state and selection logic for role agents. The agent that talks to
//! the generation capability lives in the application layer and is built on
//! these types.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──generate──▶ HasProposal ◀──┐
//!                                 │          │ refine / evolve / regenerate
//!                                 └──────────┘ (new content, version + 1)
//! ```

pub mod inspiration;
pub mod peer_review;
pub mod state;

pub use inspiration::{PeerProposal, PeerSummary, select_inspirations};
pub use peer_review::{CriterionJudgment, Judgment, PeerEvaluation};
pub use state::AgentState;
