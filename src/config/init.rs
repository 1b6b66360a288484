use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::colleges::default_colleges;
use crate::config::{get_config_path, Config};
use crate::prompt::Prompter;
use crate::quiz::{QuizConfig, DEFAULT_QUIZ_TOP_K};
use crate::scholarships::default_scholarships;
use crate::scoring::{
    CriterionConfig, Direction, FilterConfig, FilterKind, ScoringConfig, ScoringMode, DEFAULT_CEILING,
    DEFAULT_TOP_K,
};

fn parse_points(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v >= 0.0 => Ok(v),
        Ok(_) => Err("must be non-negative".to_string()),
        Err(_) => Err("must be a non-negative number".to_string()),
    }
}

fn parse_positive(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v > 0.0 => Ok(v),
        _ => Err("must be a positive number".to_string()),
    }
}

fn parse_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err("must be a whole number of at least 1".to_string()),
    }
}

fn prompt_scoring<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<ScoringConfig> {
    p.say("")?;
    p.say("Each college gets a fit score out of 100, split across three criteria.")?;
    p.say("  SAT:        full points when your SAT matches the college average")?;
    p.say("  Budget:     full points when tuition is within your budget")?;
    p.say("  Acceptance: points in proportion to the acceptance rate")?;

    let (sat, budget, acceptance) = loop {
        let sat = p.prompt_until("SAT fit points", "40", parse_points)?;
        let budget = p.prompt_until("Budget fit points", "30", parse_points)?;
        let acceptance = p.prompt_until("Acceptance rate points", "30", parse_points)?;
        let total = sat + budget + acceptance;
        if (total - DEFAULT_CEILING).abs() <= 1e-9 {
            break (sat, budget, acceptance);
        }
        p.say(&format!("  Points must add up to {}, got {}. Try again.", DEFAULT_CEILING, total))?;
    };

    p.say("")?;
    p.say("The SAT score falls to zero once your score is this far from the college average.")?;
    let reference_range = p.prompt_until("SAT reference range", "300", parse_positive)?;

    let top_k = p.prompt_until("Colleges to show", &DEFAULT_TOP_K.to_string(), parse_count)?;
    let location_only = p.prompt_yes_no("Only show colleges in the requested location?", true)?;

    Ok(ScoringConfig {
        mode: ScoringMode::Bounded,
        ceiling: Some(DEFAULT_CEILING),
        criteria: vec![
            CriterionConfig::distance("sat", "sat_avg", sat, reference_range),
            CriterionConfig::threshold("budget", "tuition", budget, Direction::AtMost),
            CriterionConfig::rate("acceptance", "acceptance_rate", acceptance),
        ],
        filters: if location_only {
            Some(vec![FilterConfig::new(FilterKind::Equals, "location")])
        } else {
            Some(Vec::new())
        },
        top_k: Some(top_k),
    })
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, it is offered as the save location; otherwise
/// the default config path is offered. Returns the written path, or None if
/// the user declined to overwrite an existing file.
pub fn run_init_wizard<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    default_path: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    p.say("")?;
    p.say("College Fit Configuration Wizard")?;
    p.say("================================")?;
    p.say("")?;

    let configure_scoring = p.prompt_yes_no("Configure scoring? (n accepts defaults)", true)?;
    let scoring = if configure_scoring {
        prompt_scoring(p)?
    } else {
        ScoringConfig::default()
    };

    p.say("")?;
    let quiz_top_k = p.prompt_until(
        "Majors to recommend after the quiz",
        &DEFAULT_QUIZ_TOP_K.to_string(),
        parse_count,
    )?;

    p.say("")?;
    p.say("The built-in college and scholarship tables can be copied into the config so you can edit them.")?;
    let copy_tables = p.prompt_yes_no("Copy the built-in tables?", false)?;

    let default_config_path = match default_path {
        Some(path) => path,
        None => get_config_path()?,
    };
    p.say("")?;
    let path_str = p.prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = p.prompt_yes_no(
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            p.say("Aborted.")?;
            return Ok(None);
        }
    }

    let config = Config {
        scoring: Some(scoring),
        colleges: copy_tables.then(default_colleges),
        scholarships: copy_tables.then(default_scholarships),
        quiz: Some(QuizConfig {
            top_k: Some(quiz_top_k),
            ..QuizConfig::default()
        }),
        aid: None,
        interview: None,
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open atomic write file at {}", config_path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", config_path.display()))?;

    p.say("")?;
    p.say(&format!("Config written to {}", config_path.display()))?;
    p.say("Run `college-fit compare --sat <SCORE> --budget <AMOUNT>` to get started.")?;

    Ok(Some(config_path))
}
