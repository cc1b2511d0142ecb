//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for stage and pipeline results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every round: proposals, scores, winners, and feedback
    Full,
    /// Only the final winning proposal (default)
    #[default]
    Winner,
    /// JSON output
    Json,
}
