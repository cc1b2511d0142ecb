//! Free-text peer evaluations

use crate::core::error::CollaboratorFailure;
use serde::{Deserialize, Serialize};

/// Outcome of asking one rubric question about one peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum Judgment {
    /// The evaluator's answer
    Assessed(String),
    /// The call failed; holds the failure description
    Failed(String),
}

impl Judgment {
    /// Map a collaborator result to a judgment, never failing
    pub fn from_result(result: Result<String, CollaboratorFailure>) -> Self {
        match result {
            Ok(text) if !text.trim().is_empty() => Judgment::Assessed(text.trim().to_string()),
            Ok(_) => Judgment::Failed(CollaboratorFailure::EmptyResponse.to_string()),
            Err(failure) => Judgment::Failed(failure.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Judgment::Failed(_))
    }

    /// Display text; failures carry an explicit marker
    pub fn text(&self) -> String {
        match self {
            Judgment::Assessed(text) => text.clone(),
            Judgment::Failed(reason) => format!("[Evaluation failed: {}]", reason),
        }
    }
}

/// Judgment for one rubric criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionJudgment {
    pub criterion: String,
    pub judgment: Judgment,
}

/// One evaluator's judgments about one peer, in rubric order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerEvaluation {
    pub evaluator: String,
    pub peer: String,
    pub judgments: Vec<CriterionJudgment>,
}

impl PeerEvaluation {
    pub fn failure_count(&self) -> usize {
        self.judgments.iter().filter(|j| j.judgment.is_failed()).count()
    }

    pub fn judgment(&self, criterion: &str) -> Option<&Judgment> {
        self.judgments
            .iter()
            .find(|j| j.criterion == criterion)
            .map(|j| &j.judgment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        assert_eq!(
            Judgment::from_result(Ok(" solid ".to_string())),
            Judgment::Assessed("solid".to_string())
        );
        assert!(Judgment::from_result(Ok("".to_string())).is_failed());
        assert!(Judgment::from_result(Err(CollaboratorFailure::Timeout)).is_failed());
    }

    #[test]
    fn test_failure_marker_text() {
        let judgment = Judgment::from_result(Err(CollaboratorFailure::Timeout));
        assert_eq!(judgment.text(), "[Evaluation failed: collaborator timed out]");
    }

    #[test]
    fn test_peer_evaluation_lookup() {
        let evaluation = PeerEvaluation {
            evaluator: "a".into(),
            peer: "b".into(),
            judgments: vec![
                CriterionJudgment {
                    criterion: "Novelty".into(),
                    judgment: Judgment::Assessed("fresh".into()),
                },
                CriterionJudgment {
                    criterion: "Feasibility".into(),
                    judgment: Judgment::Failed("down".into()),
                },
            ],
        };
        assert_eq!(evaluation.failure_count(), 1);
        assert_eq!(
            evaluation.judgment("Novelty"),
            Some(&Judgment::Assessed("fresh".into()))
        );
        assert!(evaluation.judgment("Missing").is_none());
    }
}
