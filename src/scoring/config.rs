use serde::{Deserialize, Serialize};

use super::filter::{FilterConfig, FilterKind};

/// Default bounded-mode ceiling (40 + 30 + 30)
pub const DEFAULT_CEILING: f64 = 100.0;

/// Default number of colleges shown by a comparison
pub const DEFAULT_TOP_K: usize = 5;

/// How criterion contributions are aggregated.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Every criterion contributes into a shared 0..=ceiling budget.
    #[default]
    Bounded,
    /// Raw cumulative weights, only meaningful relative to each other.
    Additive,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    /// Closeness of a number to the target, zero at `reference_range` or beyond
    Distance,
    /// Full points when the number is on the right side of the target, else zero
    Threshold,
    /// Rate in [0, 1] scaled by `max`
    Rate,
    /// Full points when the category equals the target (or the target is "any")
    Match,
    /// Raw weight scaled by `max`; unclamped above in additive mode
    Weight,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// candidate <= target (a ceiling such as a budget)
    #[default]
    AtMost,
    /// candidate >= target (a floor)
    AtLeast,
}

/// One weighted dimension of fit.
///
/// Example YAML:
/// ```yaml
/// - name: sat
///   kind: distance
///   attribute: sat_avg
///   max: 40
///   reference_range: 300
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CriterionConfig {
    pub name: String,

    pub kind: CriterionKind,

    /// Candidate attribute read by this criterion (defaults to `name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,

    /// Profile key compared against (defaults to `name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Maximum contribution (bounded mode) or multiplier (additive weight)
    pub max: f64,

    /// Deviation at which a distance criterion stops contributing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl CriterionConfig {
    fn new(name: &str, kind: CriterionKind, attribute: &str, max: f64) -> Self {
        Self {
            name: name.to_string(),
            kind,
            attribute: Some(attribute.to_string()),
            target: None,
            max,
            reference_range: None,
            direction: None,
        }
    }

    pub fn distance(name: &str, attribute: &str, max: f64, reference_range: f64) -> Self {
        Self {
            reference_range: Some(reference_range),
            ..Self::new(name, CriterionKind::Distance, attribute, max)
        }
    }

    pub fn threshold(name: &str, attribute: &str, max: f64, direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::new(name, CriterionKind::Threshold, attribute, max)
        }
    }

    pub fn rate(name: &str, attribute: &str, max: f64) -> Self {
        Self::new(name, CriterionKind::Rate, attribute, max)
    }

    pub fn matching(name: &str, attribute: &str, max: f64) -> Self {
        Self::new(name, CriterionKind::Match, attribute, max)
    }

    pub fn weight(name: &str, attribute: &str, max: f64) -> Self {
        Self::new(name, CriterionKind::Weight, attribute, max)
    }

    /// Set the profile key this criterion compares against
    pub fn against(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn attribute(&self) -> &str {
        self.attribute.as_deref().unwrap_or(&self.name)
    }

    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.name)
    }
}

/// Scoring configuration for a ranking pass.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   mode: bounded
///   ceiling: 100
///   top_k: 5
///   criteria:
///     - { name: sat, kind: distance, attribute: sat_avg, max: 40, reference_range: 300 }
///     - { name: budget, kind: threshold, attribute: tuition, max: 30 }
///     - { name: acceptance, kind: rate, attribute: acceptance_rate, max: 30 }
///   filters:
///     - { kind: equals, attribute: location }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: ScoringMode,

    /// Bounded-mode maximum aggregate score (default: 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<f64>,

    pub criteria: Vec<CriterionConfig>,

    /// Hard exclusions applied before scoring (default: equals on location).
    /// An explicit empty list disables filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
}

fn default_filters() -> Vec<FilterConfig> {
    vec![FilterConfig::new(FilterKind::Equals, "location")]
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScoringMode::Bounded,
            ceiling: Some(DEFAULT_CEILING),
            criteria: vec![
                CriterionConfig::distance("sat", "sat_avg", 40.0, 300.0),
                CriterionConfig::threshold("budget", "tuition", 30.0, Direction::AtMost),
                CriterionConfig::rate("acceptance", "acceptance_rate", 30.0),
            ],
            filters: Some(default_filters()),
            top_k: Some(DEFAULT_TOP_K),
        }
    }
}

impl ScoringConfig {
    /// Effective ceiling: the configured value in bounded mode, none in additive mode
    pub fn effective_ceiling(&self) -> Option<f64> {
        match self.mode {
            ScoringMode::Bounded => Some(self.ceiling.unwrap_or(DEFAULT_CEILING)),
            ScoringMode::Additive => None,
        }
    }

    pub fn effective_filters(&self) -> Vec<FilterConfig> {
        self.filters.clone().unwrap_or_else(default_filters)
    }

    pub fn effective_top_k(&self) -> usize {
        self.top_k.unwrap_or(DEFAULT_TOP_K)
    }
}
