//! Proposal record entity

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Numeric rating per criterion name (e.g. novelty, executability, diversity)
pub type CriterionScores = BTreeMap<String, f64>;

/// One agent's submission for a round, plus scoring metadata.
///
/// # Example
///
/// ```
/// use auction_domain::proposal::ProposalRecord;
///
/// let record = ProposalRecord::new("Engineer-1", "Use a trie for prefix lookup", 0);
/// assert!(!record.is_scored());
/// assert_eq!(record.version, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProposalRecord {
    /// Submitting agent's name, unique within a pool
    pub owner: String,
    /// Opaque text payload
    pub content: String,
    /// Per-owner version, starting at 0
    pub version: u32,
    /// Weighted score, `None` until the coordinator scores the pool
    pub score: Option<f64>,
    /// Per-criterion ratings, set together with `score`
    pub metrics: CriterionScores,
    /// Creation time (nanoseconds since epoch, strictly increasing within the
    /// process), used to find an owner's latest record
    pub created_at: u128,
}

impl ProposalRecord {
    /// Create an unscored record
    pub fn new(owner: impl Into<String>, content: impl Into<String>, version: u32) -> Self {
        Self {
            owner: owner.into(),
            content: content.into(),
            version,
            score: None,
            metrics: CriterionScores::new(),
            created_at: current_timestamp(),
        }
    }

    /// Override the creation timestamp
    pub fn with_created_at(mut self, created_at: u128) -> Self {
        self.created_at = created_at;
        self
    }

    /// Attach score and metrics in one step
    pub fn with_score(mut self, score: f64, metrics: CriterionScores) -> Self {
        self.set_evaluation(score, metrics);
        self
    }

    /// Record the coordinator's evaluation
    pub fn set_evaluation(&mut self, score: f64, metrics: CriterionScores) {
        self.score = Some(score);
        self.metrics = metrics;
    }

    /// Whether the coordinator has scored this record
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

impl std::fmt::Display for ProposalRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.score {
            Some(score) => write!(f, "{} v{} (score {:.2})", self.owner, self.version, score),
            None => write!(f, "{} v{} (unscored)", self.owner, self.version),
        }
    }
}

/// Nanoseconds since epoch, never less than or equal to a previously issued value.
///
/// The wall clock can step backwards, so each value is clamped above the last one.
fn current_timestamp() -> u128 {
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    static LAST: Mutex<u128> = Mutex::new(0);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut last = LAST.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *last = now.max(*last + 1);
    *last
}
