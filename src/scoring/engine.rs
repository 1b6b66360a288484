use tracing::debug;

use super::config::{CriterionConfig, CriterionKind, Direction, ScoringConfig, ScoringMode};
use super::error::ScoringError;
use super::factors::{distance_fit, match_fit, rate_fit, threshold_fit, weight_fit};
use super::filter::{filter_candidates, FilterConfig};
use super::ranking::top_k;
use super::types::{Candidate, Contribution, Profile, ScoredCandidate};
use super::validation::validate_scoring;

#[derive(Debug, Clone, PartialEq)]
enum Normalizer {
    Distance { reference_range: f64 },
    Threshold(Direction),
    Rate,
    Match,
    Weight,
}

/// NaN and infinities count as missing data.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// A criterion checked and ready to score.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    name: String,
    attribute: String,
    target: String,
    max: f64,
    normalizer: Normalizer,
}

impl Criterion {
    /// Check a criterion definition. The error names the offending field.
    pub fn from_config(config: &CriterionConfig) -> Result<Self, String> {
        if !config.max.is_finite() || config.max < 0.0 {
            return Err(format!("max: must be a non-negative number, got {}", config.max));
        }
        if config.kind != CriterionKind::Distance && config.reference_range.is_some() {
            return Err("reference_range: only applies to distance criteria".to_string());
        }
        if config.kind != CriterionKind::Threshold && config.direction.is_some() {
            return Err("direction: only applies to threshold criteria".to_string());
        }

        let normalizer = match config.kind {
            CriterionKind::Distance => match config.reference_range {
                Some(range) if range.is_finite() && range > 0.0 => Normalizer::Distance {
                    reference_range: range,
                },
                Some(range) => {
                    return Err(format!("reference_range: must be positive, got {}", range))
                }
                None => return Err("reference_range: required for distance criteria".to_string()),
            },
            CriterionKind::Threshold => Normalizer::Threshold(config.direction.unwrap_or_default()),
            CriterionKind::Rate => Normalizer::Rate,
            CriterionKind::Match => Normalizer::Match,
            CriterionKind::Weight => Normalizer::Weight,
        };

        Ok(Self {
            name: config.name.clone(),
            attribute: config.attribute().to_string(),
            target: config.target().to_string(),
            max: config.max,
            normalizer,
        })
    }

    /// Additive weight criterion reading `attribute`; used by the quiz accumulator.
    pub(crate) fn weight(name: &str, attribute: &str) -> Self {
        Self {
            name: name.to_string(),
            attribute: attribute.to_string(),
            target: attribute.to_string(),
            max: 1.0,
            normalizer: Normalizer::Weight,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Raw points and a short description, or None when data is missing.
    fn raw(&self, candidate: &Candidate, profile: &Profile) -> Option<(f64, String)> {
        match &self.normalizer {
            Normalizer::Distance { reference_range } => {
                let value = finite(candidate.number(&self.attribute))?;
                let target = finite(profile.number(&self.target))?;
                Some((
                    distance_fit(value, target, *reference_range, self.max),
                    format!("|{} - {}| = {} of {}", value, target, (value - target).abs(), reference_range),
                ))
            }
            Normalizer::Threshold(direction) => {
                let value = finite(candidate.number(&self.attribute))?;
                let target = finite(profile.number(&self.target))?;
                let op = match direction {
                    Direction::AtMost => "<=",
                    Direction::AtLeast => ">=",
                };
                Some((
                    threshold_fit(value, target, *direction, self.max),
                    format!("{} {} {}", value, op, target),
                ))
            }
            Normalizer::Rate => {
                let rate = finite(candidate.number(&self.attribute))?;
                Some((rate_fit(rate, self.max), format!("rate {}", rate)))
            }
            Normalizer::Match => {
                let value = candidate.category(&self.attribute)?;
                let target = profile.category(&self.target)?;
                Some((
                    match_fit(value, target, self.max),
                    format!("'{}' vs '{}'", value, target),
                ))
            }
            Normalizer::Weight => {
                let weight = finite(candidate.number(&self.attribute))?;
                Some((weight_fit(weight, self.max), format!("weight {}", weight)))
            }
        }
    }

    /// Contribution of this criterion for one candidate.
    ///
    /// Bounded mode clamps to `[0, max]`. Additive mode only floors the
    /// normalized kinds at zero; weights pass through unclamped.
    pub fn contribute(&self, candidate: &Candidate, profile: &Profile, mode: ScoringMode) -> Contribution {
        match self.raw(candidate, profile) {
            Some((points, description)) => {
                let points = match (mode, &self.normalizer) {
                    (ScoringMode::Bounded, _) => points.clamp(0.0, self.max),
                    (ScoringMode::Additive, Normalizer::Weight) => points,
                    (ScoringMode::Additive, _) => points.max(0.0),
                };
                Contribution {
                    label: self.name.clone(),
                    description,
                    points,
                    max: self.max,
                    missing: false,
                }
            }
            None => Contribution {
                label: self.name.clone(),
                description: format!("missing '{}'", self.attribute),
                points: 0.0,
                max: self.max,
                missing: true,
            },
        }
    }
}

/// Weighted fit scoring over a candidate set.
///
/// Holds only validated configuration; every call takes its candidates and
/// profile by reference and returns fresh results.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    mode: ScoringMode,
    ceiling: Option<f64>,
    criteria: Vec<Criterion>,
    filters: Vec<FilterConfig>,
}

impl ScoringEngine {
    /// Build an engine, failing with every configuration problem at once.
    pub fn new(config: &ScoringConfig) -> Result<Self, ScoringError> {
        validate_scoring(config).map_err(ScoringError::InvalidConfig)?;

        let criteria = config
            .criteria
            .iter()
            .map(|c| Criterion::from_config(c).map_err(|e| ScoringError::InvalidConfig(vec![e])))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            mode: config.mode,
            ceiling: config.effective_ceiling(),
            criteria,
            filters: config.effective_filters(),
        })
    }

    /// Additive engine over already-built criteria, without filters.
    pub(crate) fn additive(criteria: Vec<Criterion>) -> Self {
        Self {
            mode: ScoringMode::Additive,
            ceiling: None,
            criteria,
            filters: Vec::new(),
        }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Maximum aggregate score in bounded mode
    pub fn ceiling(&self) -> Option<f64> {
        self.ceiling
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Score one candidate. `index` is its position in the caller's input.
    pub fn score(&self, index: usize, candidate: &Candidate, profile: &Profile) -> ScoredCandidate {
        let mut score = 0.0;
        let mut incomplete = false;
        let mut breakdown = Vec::with_capacity(self.criteria.len());

        for criterion in &self.criteria {
            let contribution = criterion.contribute(candidate, profile, self.mode);
            if contribution.missing {
                debug!(
                    candidate = %candidate.name,
                    criterion = %criterion.name,
                    "missing data, criterion scored as zero"
                );
                incomplete = true;
            }
            score += contribution.points;
            breakdown.push(contribution);
        }

        ScoredCandidate {
            candidate: candidate.clone(),
            index,
            score,
            incomplete,
            breakdown,
        }
    }

    /// Apply filters, then score every survivor. Input order is preserved.
    pub fn score_all(&self, candidates: &[Candidate], profile: &Profile) -> Vec<ScoredCandidate> {
        let kept = filter_candidates(candidates, &self.filters, profile);
        debug!(
            total = candidates.len(),
            kept = kept.len(),
            "filters applied"
        );
        kept.into_iter()
            .map(|(index, candidate)| self.score(index, candidate, profile))
            .collect()
    }

    /// Filter, score and return the best `k`, highest first.
    pub fn rank(&self, candidates: &[Candidate], profile: &Profile, k: usize) -> Vec<ScoredCandidate> {
        top_k(self.score_all(candidates, profile), k)
    }
}
