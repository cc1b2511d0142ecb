//! Choosing which peers an agent learns from during evolution

use crate::util::truncate_chars;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A peer's current proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerProposal {
    pub name: String,
    pub content: String,
}

impl PeerProposal {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A bounded excerpt of a peer proposal, as shown to the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSummary {
    pub name: String,
    pub excerpt: String,
}

impl PeerSummary {
    /// Keep the first `max_chars` characters of the peer's content
    pub fn of(peer: &PeerProposal, max_chars: usize) -> Self {
        Self {
            name: peer.name.clone(),
            excerpt: truncate_chars(&peer.content, max_chars).to_string(),
        }
    }
}

impl std::fmt::Display for PeerSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.excerpt)
    }
}

/// Pick up to `limit` peers with the highest recorded score.
///
/// Peers without a recorded score and the agent itself (`self_name`) are
/// skipped. Equal scores keep the order of `peers`.
pub fn select_inspirations<'a>(
    peers: &'a [PeerProposal],
    scores: &HashMap<String, f64>,
    self_name: &str,
    limit: usize,
) -> Vec<&'a PeerProposal> {
    let mut candidates: Vec<(&PeerProposal, f64)> = peers
        .iter()
        .filter(|p| p.name != self_name)
        .filter_map(|p| {
            scores
                .get(&p.name)
                .copied()
                .filter(|s| !s.is_nan())
                .map(|s| (p, s))
        })
        .collect();

    // sort_by is stable, so ties stay in peer-list order
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.into_iter().take(limit).map(|(p, _)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peers(names: &[&str]) -> Vec<PeerProposal> {
        names
            .iter()
            .map(|n| PeerProposal::new(*n, format!("{n} content")))
            .collect()
    }

    fn scores(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_top_two_by_score() {
        let peers = peers(&["a", "b", "c", "d"]);
        let scores = scores(&[("a", 2.0), ("b", 9.0), ("c", 4.0), ("d", 7.0)]);

        let names: Vec<_> = select_inspirations(&peers, &scores, "me", 2)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "d"]);
    }

    #[test]
    fn test_ties_keep_peer_order() {
        let peers = peers(&["a", "b", "c"]);
        let scores = scores(&[("a", 5.0), ("b", 6.0), ("c", 6.0)]);

        let names: Vec<_> = select_inspirations(&peers, &scores, "me", 2)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn test_skips_self_and_unscored() {
        let peers = peers(&["me", "a", "b"]);
        let scores = scores(&[("me", 10.0), ("a", 1.0)]);

        let names: Vec<_> = select_inspirations(&peers, &scores, "me", 2)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_no_peers() {
        assert!(select_inspirations(&[], &HashMap::new(), "me", 2).is_empty());
    }

    #[test]
    fn test_summary_bounded() {
        let peer = PeerProposal::new("a", "x".repeat(800));
        let summary = PeerSummary::of(&peer, 500);
        assert_eq!(summary.excerpt.chars().count(), 500);
        assert!(summary.to_string().starts_with("a: xxx"));
    }
}
