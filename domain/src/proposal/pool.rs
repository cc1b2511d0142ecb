//! Proposal pool for a single round

use super::record::ProposalRecord;
use serde::{Deserialize, Serialize};

/// Ordered, append-only collection of the records competing in one round.
///
/// The pool does not deduplicate owners; the stage runner adds exactly one
/// record per agent per round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalPool {
    records: Vec<ProposalRecord>,
}

impl ProposalPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn add(&mut self, record: ProposalRecord) {
        self.records.push(record);
    }

    /// All records in insertion order
    pub fn get_all(&self) -> &[ProposalRecord] {
        &self.records
    }

    /// Mutable access for the coordinator, which writes score and metrics
    pub fn records_mut(&mut self) -> &mut [ProposalRecord] {
        &mut self.records
    }

    /// Records submitted by `owner`, in insertion order
    pub fn get_by_owner<'a, 'o>(
        &'a self,
        owner: &'o str,
    ) -> impl Iterator<Item = &'a ProposalRecord> + use<'a, 'o> {
        self.records.iter().filter(move |r| r.owner == owner)
    }

    /// The owner's record with the greatest `created_at`.
    ///
    /// On equal timestamps the later-inserted record wins.
    pub fn latest_by_owner(&self, owner: &str) -> Option<&ProposalRecord> {
        self.get_by_owner(owner).max_by_key(|r| r.created_at)
    }

    /// The first record in insertion order holding the maximum score.
    ///
    /// Unscored records are skipped; returns `None` when nothing is scored.
    pub fn top_scored(&self) -> Option<&ProposalRecord> {
        crate::auction::selection::select_winner(&self.records)
    }

    /// Remove all records so the pool can be reused for the next round
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the pool, returning its records
    pub fn into_records(self) -> Vec<ProposalRecord> {
        self.records
    }
}

impl std::fmt::Display for ProposalPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProposalPool(n={})", self.records.len())
    }
}
