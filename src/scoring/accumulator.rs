use super::engine::{Criterion, ScoringEngine};
use super::types::{Candidate, Profile, ScoredCandidate};

/// One recorded choice: a label (e.g. "Question 1") and the weights it adds.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub label: String,
    pub weights: Vec<(String, i64)>,
}

/// Running per-category totals fed by a sequence of selections.
///
/// Categories appear in first-touched order. The leaderboard can be read at
/// any point and selections may continue afterwards.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    totals: Vec<(String, i64)>,
    selections: Vec<Selection>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every (category, weight) pair of one selection.
    pub fn select<I, S>(&mut self, label: impl Into<String>, weights: I)
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let weights: Vec<(String, i64)> = weights.into_iter().map(|(c, w)| (c.into(), w)).collect();

        for (category, weight) in &weights {
            match self.totals.iter_mut().find(|(name, _)| name == category) {
                Some((_, total)) => *total = total.saturating_add(*weight),
                None => self.totals.push((category.clone(), *weight)),
            }
        }

        self.selections.push(Selection {
            label: label.into(),
            weights,
        });
    }

    pub fn total(&self, category: &str) -> Option<i64> {
        self.totals
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    /// Totals in first-touched order
    pub fn totals(&self) -> &[(String, i64)] {
        &self.totals
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Top `k` categories, highest total first; ties keep first-touched order.
    ///
    /// Each category becomes a candidate carrying one attribute per selection,
    /// scored by an additive engine with one weight criterion per selection,
    /// so the breakdown shows what each answer contributed.
    pub fn leaderboard(&self, k: usize) -> Vec<ScoredCandidate> {
        let keys: Vec<String> = (0..self.selections.len())
            .map(|i| format!("selection_{}", i))
            .collect();

        let criteria = self
            .selections
            .iter()
            .zip(&keys)
            .map(|(selection, key)| Criterion::weight(&selection.label, key))
            .collect();

        let candidates: Vec<Candidate> = self
            .totals
            .iter()
            .map(|(category, _)| {
                self.selections
                    .iter()
                    .zip(&keys)
                    .fold(Candidate::new(category.as_str()), |candidate, (selection, key)| {
                        let points: i64 = selection
                            .weights
                            .iter()
                            .filter(|(name, _)| name == category)
                            .map(|(_, w)| *w)
                            .sum();
                        candidate.with(key.as_str(), points)
                    })
            })
            .collect();

        ScoringEngine::additive(criteria).rank(&candidates, &Profile::new(), k)
    }
}
