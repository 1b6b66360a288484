mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Get the config directory path (~/.config/college-fit/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("college-fit"))
}

/// Get the default config file path (~/.config/college-fit/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/college-fit/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing file at the default path is not an error: built-in defaults are used.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        debug!(path = %config_path.display(), "no config file, using built-in defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Validate every section of the effective configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(e) = crate::scoring::validate_scoring(&config.effective_scoring()) {
        errors.extend(e);
    }
    if let Err(e) = crate::quiz::validate_quiz(&config.effective_quiz()) {
        errors.extend(e);
    }
    if let Err(e) = crate::aid::validate_aid(&config.effective_aid()) {
        errors.extend(e);
    }
    if let Err(e) = crate::interview::validate_interview(&config.effective_interview()) {
        errors.extend(e);
    }

    if let Some(colleges) = &config.colleges {
        for (i, college) in colleges.iter().enumerate() {
            if !(0.0..=1.0).contains(&college.acceptance_rate) {
                errors.push(format!(
                    "colleges[{}].acceptance_rate: must be between 0 and 1, got {}",
                    i, college.acceptance_rate
                ));
            }
        }
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
    use crate::colleges::{compare, CompareRequest};
    use crate::scoring::{ScoringEngine, ScoringMode};

    fn write_config(dir: &tempfile::TempDir, yaml: &str) -> PathBuf {
        let path = dir.path().join("config.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("nope.yaml")));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "{}");
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.effective_colleges().len(), 5);
        assert_eq!(config.effective_scholarships().len(), 5);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
scoring:
  criteria:
    - { name: sat, kind: distance, attribute: sat_avg, max: 60, reference_range: 200 }
    - { name: budget, kind: threshold, attribute: tuition, max: 40 }
  top_k: 2
colleges:
  - { name: Hill College, tuition: 30000, sat_avg: 1300, acceptance_rate: 0.5, location: OR }
"#,
        );
        let config = load_config(Some(path)).unwrap();
        let scoring = config.effective_scoring();
        assert_eq!(scoring.mode, ScoringMode::Bounded);
        assert_eq!(scoring.criteria.len(), 2);
        assert_eq!(scoring.effective_top_k(), 2);
        assert_eq!(config.effective_colleges().len(), 1);
        assert_eq!(config.effective_quiz().questions.len(), 3);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_interview_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
interview:
  questions: ["Why this college?", "What will you study?"]
  count: 1
"#,
        );
        let config = load_config(Some(path)).unwrap();
        let interview = config.effective_interview();
        assert_eq!(interview.questions.len(), 2);
        assert_eq!(interview.select(interview.effective_count(), 1), vec!["What will you study?"]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_criteria_only_config_keeps_location_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
scoring:
  criteria:
    - { name: sat, kind: distance, attribute: sat_avg, max: 50, reference_range: 300 }
    - { name: budget, kind: threshold, attribute: tuition, max: 50 }
"#,
        );
        let config = load_config(Some(path)).unwrap();
        let scoring = config.effective_scoring();
        assert_eq!(scoring.effective_filters().len(), 1);

        let engine = ScoringEngine::new(&scoring).unwrap();
        let colleges = config.effective_colleges();
        let request = CompareRequest {
            sat: 1300.0,
            budget: 60000.0,
            location: Some("CA".to_string()),
        };
        let matches = compare(&colleges, &engine, &request, 5);
        assert_eq!(matches.len(), 1);
        assert!(matches.iter().all(|m| m.college.location == "CA"));
    }

    #[test]
    fn test_explicit_empty_filters_disable_filtering() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
scoring:
  criteria:
    - { name: budget, kind: threshold, attribute: tuition, max: 100 }
  filters: []
"#,
        );
        let config = load_config(Some(path)).unwrap();
        assert!(config.effective_scoring().effective_filters().is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "scoring: [unclosed");
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_unknown_section_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "essays: []");
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_validate_config_collects_across_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
scoring:
  criteria:
    - { name: sat, kind: distance, attribute: sat_avg, max: 40, reference_range: 0 }
    - { name: rest, kind: rate, attribute: acceptance_rate, max: 60 }
quiz:
  top_k: 0
interview:
  count: 0
colleges:
  - { name: Odd College, tuition: 1, sat_avg: 1, acceptance_rate: 45, location: CA }
"#,
        );
        let config = load_config(Some(path)).unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.starts_with("scoring.criteria[0].reference_range")));
        assert!(errors.iter().any(|e| e.starts_with("quiz.top_k")));
        assert!(errors.iter().any(|e| e.starts_with("interview.count")));
        assert!(errors.iter().any(|e| e.starts_with("colleges[0].acceptance_rate")));
    }
}
