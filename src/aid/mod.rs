use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::scoring::RangeOp;

/// Need-based aid for one income bracket:
/// `min(tuition * share, tuition - reserve)`, never below zero.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NeedBracket {
    /// Range expression over family income (e.g., "<30000", ">=100000")
    pub income: String,
    pub share: f64,
    pub reserve: f64,
}

/// Merit aid tier: `tuition * share` when the GPA matches.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MeritTier {
    /// Range expression over GPA (e.g., ">=3.8")
    pub gpa: String,
    pub share: f64,
}

/// Financial aid estimation tables.
///
/// Brackets and tiers are checked in order; the first match wins.
///
/// Example YAML:
/// ```yaml
/// aid:
///   need_brackets:
///     - { income: "<30000", share: 0.9, reserve: 2000 }
///     - { income: ">=30000", share: 0.5, reserve: 5000 }
///   merit_tiers:
///     - { gpa: ">=3.5", share: 0.15 }
///   max_coverage: 0.95
///   expected_contribution: 0.1
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AidConfig {
    pub need_brackets: Vec<NeedBracket>,

    pub merit_tiers: Vec<MeritTier>,

    /// Total aid is capped at this share of tuition
    #[serde(default = "default_max_coverage")]
    pub max_coverage: f64,

    /// Share of family income expected to go toward the net cost
    #[serde(default = "default_expected_contribution")]
    pub expected_contribution: f64,
}

fn default_max_coverage() -> f64 {
    0.95
}

fn default_expected_contribution() -> f64 {
    0.10
}

impl Default for AidConfig {
    fn default() -> Self {
        let bracket = |income: &str, share: f64, reserve: f64| NeedBracket {
            income: income.to_string(),
            share,
            reserve,
        };
        let tier = |gpa: &str, share: f64| MeritTier {
            gpa: gpa.to_string(),
            share,
        };
        Self {
            need_brackets: vec![
                bracket("<30000", 0.90, 2000.0),
                bracket("<60000", 0.70, 5000.0),
                bracket("<100000", 0.40, 10000.0),
                bracket(">=100000", 0.20, 20000.0),
            ],
            merit_tiers: vec![tier(">=3.8", 0.25), tier(">=3.5", 0.15), tier(">=3.2", 0.10)],
            max_coverage: default_max_coverage(),
            expected_contribution: default_expected_contribution(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AidEstimate {
    pub tuition: f64,
    pub need_based: f64,
    pub merit: f64,
    pub total: f64,
    pub net_cost: f64,
    pub loans: f64,
}

fn first_match<'a, T>(items: &'a [T], value: f64, range: impl Fn(&T) -> &str) -> Result<Option<&'a T>> {
    for item in items {
        if RangeOp::parse(range(item))?.matches(value) {
            return Ok(Some(item));
        }
    }
    Ok(None)
}

/// Estimate the aid package for one college.
pub fn estimate_aid(config: &AidConfig, income: f64, gpa: f64, tuition: f64) -> Result<AidEstimate> {
    let need_based = first_match(&config.need_brackets, income, |b| b.income.as_str())?
        .map(|b| (tuition * b.share).min(tuition - b.reserve).max(0.0))
        .unwrap_or(0.0);

    let merit = first_match(&config.merit_tiers, gpa, |t| t.gpa.as_str())?
        .map(|t| tuition * t.share)
        .unwrap_or(0.0);

    let total = (need_based + merit).min(tuition * config.max_coverage);
    let net_cost = tuition - total;
    let loans = (net_cost - income * config.expected_contribution).max(0.0);

    Ok(AidEstimate {
        tuition,
        need_based,
        merit,
        total,
        net_cost,
        loans,
    })
}

/// Validate aid configuration at startup.
pub fn validate_aid(config: &AidConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, bracket) in config.need_brackets.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&bracket.income) {
            errors.push(format!(
                "aid.need_brackets[{}].income: invalid '{}' - {}",
                i, bracket.income, e
            ));
        }
        if !(0.0..=1.0).contains(&bracket.share) {
            errors.push(format!("aid.need_brackets[{}].share: must be between 0 and 1", i));
        }
        if bracket.reserve < 0.0 {
            errors.push(format!("aid.need_brackets[{}].reserve: must be non-negative", i));
        }
    }

    for (i, tier) in config.merit_tiers.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&tier.gpa) {
            errors.push(format!("aid.merit_tiers[{}].gpa: invalid '{}' - {}", i, tier.gpa, e));
        }
        if !(0.0..=1.0).contains(&tier.share) {
            errors.push(format!("aid.merit_tiers[{}].share: must be between 0 and 1", i));
        }
    }

    if !(0.0..=1.0).contains(&config.max_coverage) {
        errors.push("aid.max_coverage: must be between 0 and 1".to_string());
    }
    if !(0.0..=1.0).contains(&config.expected_contribution) {
        errors.push("aid.expected_contribution: must be between 0 and 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
