use std::collections::HashSet;

use super::config::{ScoringConfig, ScoringMode};
use super::engine::Criterion;

/// Tolerance when comparing the sum of criterion maxima with the ceiling
const CEILING_EPSILON: f64 = 1e-9;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.criteria.is_empty() {
        errors.push("scoring.criteria: at least one criterion is required".to_string());
    }

    let mut seen = HashSet::new();
    for (i, criterion) in config.criteria.iter().enumerate() {
        if criterion.name.trim().is_empty() {
            errors.push(format!("scoring.criteria[{}].name: must not be empty", i));
        } else if !seen.insert(criterion.name.as_str()) {
            errors.push(format!(
                "scoring.criteria[{}].name: duplicate criterion '{}'",
                i, criterion.name
            ));
        }

        if let Err(e) = Criterion::from_config(criterion) {
            errors.push(format!("scoring.criteria[{}].{}", i, e));
        }
    }

    match config.mode {
        ScoringMode::Bounded => {
            let ceiling = config.effective_ceiling().unwrap_or_default();
            if !ceiling.is_finite() || ceiling <= 0.0 {
                errors.push(format!("scoring.ceiling: must be positive, got {}", ceiling));
            } else if !config.criteria.is_empty() {
                let total: f64 = config.criteria.iter().map(|c| c.max).sum();
                if (total - ceiling).abs() > CEILING_EPSILON {
                    errors.push(format!(
                        "scoring.criteria: maximum contributions sum to {} but the ceiling is {}",
                        total, ceiling
                    ));
                }
            }
        }
        ScoringMode::Additive => {
            if config.ceiling.is_some() {
                errors.push("scoring.ceiling: only applies to bounded mode".to_string());
            }
        }
    }

    for (i, filter) in config.effective_filters().iter().enumerate() {
        if filter.attribute.trim().is_empty() {
            errors.push(format!("scoring.filters[{}].attribute: must not be empty", i));
        }
    }

    if config.top_k == Some(0) {
        errors.push("scoring.top_k: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CriterionConfig, Direction, FilterConfig, FilterKind};

    fn bounded(criteria: Vec<CriterionConfig>) -> ScoringConfig {
        ScoringConfig {
            mode: ScoringMode::Bounded,
            ceiling: Some(100.0),
            criteria,
            filters: Some(vec![]),
            top_k: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_criteria() {
        let errors = validate_scoring(&bounded(vec![])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.criteria"));
    }

    #[test]
    fn test_negative_max() {
        let config = bounded(vec![
            CriterionConfig::rate("acceptance", "acceptance_rate", -30.0),
            CriterionConfig::rate("other", "other", 130.0),
        ]);
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.criteria[0].max"));
    }

    #[test]
    fn test_zero_reference_range() {
        let config = bounded(vec![CriterionConfig::distance("sat", "sat_avg", 100.0, 0.0)]);
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.criteria[0].reference_range"));
    }

    #[test]
    fn test_ceiling_mismatch() {
        let config = bounded(vec![
            CriterionConfig::distance("sat", "sat_avg", 40.0, 300.0),
            CriterionConfig::threshold("budget", "tuition", 30.0, Direction::AtMost),
        ]);
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("sum to 70"));
    }

    #[test]
    fn test_non_positive_ceiling() {
        let mut config = bounded(vec![CriterionConfig::rate("acceptance", "acceptance_rate", 0.0)]);
        config.ceiling = Some(0.0);
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.ceiling"));
    }

    #[test]
    fn test_duplicate_names() {
        let config = bounded(vec![
            CriterionConfig::rate("fit", "a", 50.0),
            CriterionConfig::rate("fit", "b", 50.0),
        ]);
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("duplicate criterion 'fit'"));
    }

    #[test]
    fn test_additive_ignores_ceiling_sum() {
        let config = ScoringConfig {
            mode: ScoringMode::Additive,
            ceiling: None,
            criteria: vec![CriterionConfig::weight("q1", "q1", 3.0)],
            filters: Some(vec![]),
            top_k: Some(3),
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_additive_rejects_ceiling() {
        let config = ScoringConfig {
            mode: ScoringMode::Additive,
            ceiling: Some(100.0),
            criteria: vec![CriterionConfig::weight("q1", "q1", 1.0)],
            filters: Some(vec![]),
            top_k: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("bounded mode"));
    }

    #[test]
    fn test_empty_filter_attribute() {
        let mut config = ScoringConfig::default();
        config.filters = Some(vec![
            FilterConfig::new(FilterKind::Equals, "location"),
            FilterConfig::new(FilterKind::Equals, " "),
        ]);
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.filters[1].attribute"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = bounded(vec![
            CriterionConfig::distance("sat", "sat_avg", 40.0, -1.0), // Error 1
            CriterionConfig::rate("", "acceptance_rate", 60.0),      // Error 2
        ]);
        config.top_k = Some(0); // Error 3
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
