//! Round records and the stage trace derived from them

use crate::agent::PeerEvaluation;
use crate::metrics::{is_incorporated, split_insights};
use crate::proposal::ProposalRecord;
use serde::{Deserialize, Serialize};

/// Feedback handed to one losing agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub recipient: String,
    pub text: String,
    /// Whether the critic failed and generic guidance was used
    pub fallback: bool,
}

/// Everything that happened in one round of a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number (1-indexed)
    pub round: usize,
    /// The scored pool, in insertion order
    pub proposals: Vec<ProposalRecord>,
    /// Owner of the winning record, if any record was scored
    pub winner: Option<String>,
    /// Feedback per loser, in pool order
    pub feedback: Vec<FeedbackEntry>,
    /// Mean pairwise text diversity of the pool
    pub diversity: f64,
    /// Free-text peer evaluations (peer-evolution stages only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub peer_reviews: Vec<PeerEvaluation>,
}

impl RoundRecord {
    pub fn proposal_of(&self, owner: &str) -> Option<&ProposalRecord> {
        self.proposals.iter().find(|p| p.owner == owner)
    }

    pub fn winning_proposal(&self) -> Option<&ProposalRecord> {
        self.winner.as_deref().and_then(|w| self.proposal_of(w))
    }

    pub fn feedback_for(&self, owner: &str) -> Option<&FeedbackEntry> {
        self.feedback.iter().find(|f| f.recipient == owner)
    }
}

/// What ProcessMetrics needs from one completed stage
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StageTrace {
    /// Identity of the stage's final winner
    pub winner: Option<String>,
    /// Per refinement: did the score rise after feedback?
    pub improvements: Vec<bool>,
    /// Insights offered across all feedback
    pub insights_offered: usize,
    /// Insights demonstrably taken up by the next proposal
    pub insights_incorporated: usize,
}

impl StageTrace {
    /// Derive the trace of an auction stage.
    ///
    /// For every agent that received feedback in round `r` and has a record
    /// in round `r + 1`, compares the two records' scores and checks each
    /// feedback insight against the two contents. Feedback in the last
    /// round is never acted on and is not counted.
    pub fn from_rounds(rounds: &[RoundRecord]) -> Self {
        let mut trace = StageTrace {
            winner: rounds.last().and_then(|r| r.winner.clone()),
            ..Default::default()
        };

        for pair in rounds.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            for entry in &current.feedback {
                let (Some(before), Some(after)) = (
                    current.proposal_of(&entry.recipient),
                    next.proposal_of(&entry.recipient),
                ) else {
                    continue;
                };

                if let (Some(old), Some(new)) = (before.score, after.score) {
                    trace.improvements.push(new > old);
                }

                for insight in split_insights(&entry.text) {
                    trace.insights_offered += 1;
                    if is_incorporated(&insight, &before.content, &after.content) {
                        trace.insights_incorporated += 1;
                    }
                }
            }
        }

        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::CriterionScores;

    fn record(owner: &str, content: &str, score: f64) -> ProposalRecord {
        ProposalRecord::new(owner, content, 0).with_score(score, CriterionScores::new())
    }

    fn feedback(recipient: &str, text: &str) -> FeedbackEntry {
        FeedbackEntry {
            recipient: recipient.to_string(),
            text: text.to_string(),
            fallback: false,
        }
    }

    fn round(n: usize, proposals: Vec<ProposalRecord>, winner: &str, fb: Vec<FeedbackEntry>) -> RoundRecord {
        RoundRecord {
            round: n,
            proposals,
            winner: Some(winner.to_string()),
            feedback: fb,
            diversity: 0.0,
            peer_reviews: Vec::new(),
        }
    }

    #[test]
    fn test_trace_from_rounds() {
        let rounds = vec![
            round(
                1,
                vec![record("a", "Use a list.", 7.0), record("b", "Use a queue.", 5.0)],
                "a",
                vec![feedback("b", "- Add retry handling\n- Mention latency budgets")],
            ),
            round(
                2,
                vec![
                    record("a", "Use a list.", 7.0),
                    record("b", "Use a queue with retry handling.", 8.0),
                ],
                "b",
                vec![feedback("a", "Consider sharding")],
            ),
        ];

        let trace = StageTrace::from_rounds(&rounds);
        assert_eq!(trace.winner.as_deref(), Some("b"));
        assert_eq!(trace.improvements, vec![true]);
        assert_eq!(trace.insights_offered, 2);
        assert_eq!(trace.insights_incorporated, 1);
    }

    #[test]
    fn test_single_round_has_no_adaptation() {
        let rounds = vec![round(
            1,
            vec![record("a", "x", 1.0), record("b", "y", 0.5)],
            "a",
            vec![feedback("b", "do better")],
        )];

        let trace = StageTrace::from_rounds(&rounds);
        assert_eq!(trace.winner.as_deref(), Some("a"));
        assert!(trace.improvements.is_empty());
        assert_eq!(trace.insights_offered, 0);
    }

    #[test]
    fn test_empty_rounds() {
        assert_eq!(StageTrace::from_rounds(&[]), StageTrace::default());
    }

    #[test]
    fn test_round_lookups() {
        let r = round(1, vec![record("a", "x", 2.0)], "a", vec![feedback("b", "hi")]);
        assert_eq!(r.winning_proposal().unwrap().owner, "a");
        assert!(r.feedback_for("b").is_some());
        assert!(r.proposal_of("zzz").is_none());
    }
}
