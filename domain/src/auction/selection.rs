//! Winner selection

use crate::proposal::ProposalRecord;

/// Return the record with the highest score.
///
/// Unscored records (and NaN scores) never win. When several records share
/// the maximum, the first one in insertion order is returned, so repeated
/// calls on the same input always agree. Returns `None` for an empty or
/// entirely unscored input.
pub fn select_winner(records: &[ProposalRecord]) -> Option<&ProposalRecord> {
    let mut best: Option<(&ProposalRecord, f64)> = None;

    for record in records {
        let Some(score) = record.score.filter(|s| !s.is_nan()) else {
            continue;
        };
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((record, score)),
        }
    }

    best.map(|(record, _)| record)
}

/// Scored records ordered by descending score.
///
/// Ties keep insertion order; unscored records are left out.
pub fn rank_by_score(records: &[ProposalRecord]) -> Vec<&ProposalRecord> {
    let mut scored: Vec<&ProposalRecord> = records
        .iter()
        .filter(|r| r.score.is_some_and(|s| !s.is_nan()))
        .collect();
    scored.sort_by(|a, b| {
        let (a, b) = (a.score.unwrap_or(f64::MIN), b.score.unwrap_or(f64::MIN));
        b.total_cmp(&a)
    });
    scored
}
