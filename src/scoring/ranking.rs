use std::cmp::Ordering;

use super::types::ScoredCandidate;

/// Sort by score descending and keep the first `k`.
///
/// `sort_by` is stable, so equal scores keep their input order.
pub fn top_k(mut scored: Vec<ScoredCandidate>, k: usize) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(k);
    scored
}
