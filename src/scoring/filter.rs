use serde::{Deserialize, Serialize};

use super::types::{is_wildcard, Candidate, Profile};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Category equals the profile value (case-insensitive); "any" passes everything
    Equals,
    /// Number is at most the profile value
    AtMost,
    /// Number is at least the profile value
    AtLeast,
    /// Candidate category is "Any" or contains the profile value (case-insensitive)
    Matches,
}

/// Hard exclusion predicate over a candidate and the profile.
///
/// A candidate missing `attribute` fails; a profile without `target` leaves
/// the filter unconstrained.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    pub kind: FilterKind,

    pub attribute: String,

    /// Profile key (defaults to `attribute`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl FilterConfig {
    pub fn new(kind: FilterKind, attribute: &str) -> Self {
        Self {
            kind,
            attribute: attribute.to_string(),
            target: None,
        }
    }

    pub fn against(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.attribute)
    }

    pub fn allows(&self, candidate: &Candidate, profile: &Profile) -> bool {
        let Some(wanted) = profile.get(self.target()) else {
            return true;
        };

        match self.kind {
            FilterKind::Equals => match wanted.as_category() {
                Some(w) if is_wildcard(w) => true,
                Some(w) => candidate
                    .category(&self.attribute)
                    .is_some_and(|c| c.trim().eq_ignore_ascii_case(w.trim())),
                None => true,
            },
            FilterKind::AtMost => match wanted.as_number() {
                Some(limit) => candidate.number(&self.attribute).is_some_and(|v| v <= limit),
                None => true,
            },
            FilterKind::AtLeast => match wanted.as_number() {
                Some(limit) => candidate.number(&self.attribute).is_some_and(|v| v >= limit),
                None => true,
            },
            FilterKind::Matches => match wanted.as_category() {
                Some(w) if is_wildcard(w) => true,
                Some(w) => candidate.category(&self.attribute).is_some_and(|c| {
                    is_wildcard(c) || c.to_lowercase().contains(&w.trim().to_lowercase())
                }),
                None => true,
            },
        }
    }
}

/// Keep only candidates that pass every filter, preserving input order.
/// Returns each survivor with its position in `candidates`.
pub fn filter_candidates<'a>(
    candidates: &'a [Candidate],
    filters: &[FilterConfig],
    profile: &Profile,
) -> Vec<(usize, &'a Candidate)> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| filters.iter().all(|f| f.allows(c, profile)))
        .collect()
}
