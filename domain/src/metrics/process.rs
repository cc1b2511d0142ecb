//! Fairness and adaptation statistics over completed stages

use crate::stage::StageTrace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shannon entropy (bits) of the empirical win distribution.
///
/// Higher values mean wins are spread more evenly across agents.
///
/// ```
/// use auction_domain::metrics::task_ownership_entropy;
///
/// assert_eq!(task_ownership_entropy(&["A", "A", "B", "B"]), 1.0);
/// assert_eq!(task_ownership_entropy(&["A", "A", "A"]), 0.0);
/// assert_eq!(task_ownership_entropy::<&str>(&[]), 0.0);
/// ```
pub fn task_ownership_entropy<S: AsRef<str>>(winners: &[S]) -> f64 {
    if winners.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for winner in winners {
        *counts.entry(winner.as_ref()).or_default() += 1;
    }
    let total = winners.len() as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>()
        .max(0.0)
}

/// Fraction of post-feedback refinements whose quality signal increased
pub fn adaptation_responsiveness_rate(improvements: &[bool]) -> f64 {
    if improvements.is_empty() {
        return 0.0;
    }
    improvements.iter().filter(|&&improved| improved).count() as f64 / improvements.len() as f64
}

/// Incorporated insights over offered insights; 0 when none were offered
pub fn feedback_utilization_score(incorporated: usize, offered: usize) -> f64 {
    if offered == 0 {
        return 0.0;
    }
    incorporated as f64 / offered as f64
}

/// The three process metrics computed over many stages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProcessReport {
    pub task_ownership_entropy: f64,
    pub adaptation_responsiveness_rate: f64,
    pub feedback_utilization_score: f64,
    /// Number of stage traces the report covers
    pub stages: usize,
}

impl ProcessReport {
    /// Aggregate traces: entropy over final winners, rates over pooled counts.
    ///
    /// Stages that never produced a winner do not contribute to entropy.
    pub fn from_traces(traces: &[StageTrace]) -> Self {
        let winners: Vec<&str> = traces.iter().filter_map(|t| t.winner.as_deref()).collect();
        let improvements: Vec<bool> = traces
            .iter()
            .flat_map(|t| t.improvements.iter().copied())
            .collect();
        let offered: usize = traces.iter().map(|t| t.insights_offered).sum();
        let incorporated: usize = traces.iter().map(|t| t.insights_incorporated).sum();

        Self {
            task_ownership_entropy: task_ownership_entropy(&winners),
            adaptation_responsiveness_rate: adaptation_responsiveness_rate(&improvements),
            feedback_utilization_score: feedback_utilization_score(incorporated, offered),
            stages: traces.len(),
        }
    }
}
