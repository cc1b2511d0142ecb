//! Process metrics
//!
//! Pure functions over completed stage traces, plus the text helpers they
//! need:
//!
//! | Metric | Measures | Empty input |
//! |--------|----------|-------------|
//! | Task Ownership Entropy | how evenly wins spread across agents (bits) | 0 |
//! | Adaptation Responsiveness Rate | share of refinements that raised the score | 0 |
//! | Feedback Utilization Score | share of offered insights that were incorporated | 0 |

pub mod insight;
pub mod process;
pub mod similarity;

pub use insight::{is_incorporated, split_insights};
pub use process::{
    ProcessReport, adaptation_responsiveness_rate, feedback_utilization_score,
    task_ownership_entropy,
};
pub use similarity::{diversity, novelty, similarity_ratio};
