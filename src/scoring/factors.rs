use anyhow::{bail, Result};

use super::config::Direction;
use super::types::is_wildcard;

/// Numeric range expression used by bracket tables.
/// Syntax: "<N", "<=N", ">N", ">=N", "N-M" (inclusive) or "N".
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if let Some((low, high)) = s.split_once('-').filter(|_| !s.starts_with('-')) {
            let low: f64 = low.trim().parse()?;
            let high: f64 = high.trim().parse()?;
            if low > high {
                bail!("Range lower bound exceeds upper bound: {}", s)
            }
            Ok(RangeOp::Between(low, high))
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

/// `max * max(0, (range - |value - target|) / range)`
pub fn distance_fit(value: f64, target: f64, reference_range: f64, max: f64) -> f64 {
    let deviation = (value - target).abs();
    max * ((reference_range - deviation) / reference_range).max(0.0)
}

/// All or nothing: `max` when `value` sits on the permitted side of `target`.
pub fn threshold_fit(value: f64, target: f64, direction: Direction, max: f64) -> f64 {
    let passes = match direction {
        Direction::AtMost => value <= target,
        Direction::AtLeast => value >= target,
    };
    if passes {
        max
    } else {
        0.0
    }
}

pub fn rate_fit(rate: f64, max: f64) -> f64 {
    rate * max
}

pub fn match_fit(value: &str, target: &str, max: f64) -> f64 {
    if is_wildcard(target) || value.trim().eq_ignore_ascii_case(target.trim()) {
        max
    } else {
        0.0
    }
}

pub fn weight_fit(weight: f64, max: f64) -> f64 {
    weight * max
}
