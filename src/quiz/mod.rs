pub mod questions;
pub mod session;
pub mod storage;

pub use questions::{default_descriptions, default_questions, FALLBACK_DESCRIPTION};
pub use session::run_interactive;
pub use storage::{append_record, get_history_path, load_history, save_history, QuizHistory, QuizRecord};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::scoring::Accumulator;

/// Default number of majors recommended
pub const DEFAULT_QUIZ_TOP_K: usize = 3;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MajorWeight {
    pub major: String,
    pub points: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuizOption {
    pub key: String, // "a", "b", ...
    pub text: String,
    pub weights: Vec<MajorWeight>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

impl Question {
    /// Look up an option by key (case-insensitive)
    pub fn option(&self, key: &str) -> Option<&QuizOption> {
        let key = key.trim();
        self.options.iter().find(|o| o.key.eq_ignore_ascii_case(key))
    }

    /// "a, b, c, or d"
    pub fn key_list(&self) -> String {
        let keys: Vec<&str> = self.options.iter().map(|o| o.key.as_str()).collect();
        match keys.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
            Some((last, _)) => last.to_string(),
            None => String::new(),
        }
    }
}

/// Quiz questions, the major description table and how many majors to recommend.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuizConfig {
    #[serde(default = "default_questions")]
    pub questions: Vec<Question>,

    #[serde(default = "default_descriptions")]
    pub descriptions: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            descriptions: default_descriptions(),
            top_k: Some(DEFAULT_QUIZ_TOP_K),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Recommendation {
    pub major: String,
    pub score: i64,
    pub description: String,
}

impl QuizConfig {
    pub fn effective_top_k(&self) -> usize {
        self.top_k.unwrap_or(DEFAULT_QUIZ_TOP_K)
    }

    pub fn describe(&self, major: &str) -> &str {
        self.descriptions
            .get(major)
            .map(String::as_str)
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    /// Top `k` majors from the accumulated answers, with descriptions.
    pub fn recommendations(&self, accumulator: &Accumulator, k: usize) -> Vec<Recommendation> {
        accumulator
            .leaderboard(k)
            .into_iter()
            .map(|result| Recommendation {
                description: self.describe(result.name()).to_string(),
                score: result.score.round() as i64,
                major: result.candidate.name,
            })
            .collect()
    }
}

/// Record the answer to question `number` (1-based) in `accumulator`.
pub fn answer(accumulator: &mut Accumulator, number: usize, question: &Question, key: &str) -> Result<()> {
    let Some(option) = question.option(key) else {
        bail!(
            "Question {}: '{}' is not a valid answer (expected {})",
            number,
            key,
            question.key_list()
        );
    };
    accumulator.select(
        format!("Question {}", number),
        option.weights.iter().map(|w| (w.major.as_str(), w.points)),
    );
    Ok(())
}

/// Score a complete set of answers, one key per question in order.
pub fn score_answers<S: AsRef<str>>(questions: &[Question], answers: &[S]) -> Result<Accumulator> {
    if answers.len() != questions.len() {
        bail!(
            "Expected {} answers (one per question), got {}",
            questions.len(),
            answers.len()
        );
    }

    let mut accumulator = Accumulator::new();
    for (i, (question, key)) in questions.iter().zip(answers).enumerate() {
        answer(&mut accumulator, i + 1, question, key.as_ref())?;
    }
    Ok(accumulator)
}

/// Validate quiz configuration at startup.
pub fn validate_quiz(config: &QuizConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.questions.is_empty() {
        errors.push("quiz.questions: at least one question is required".to_string());
    }

    for (i, question) in config.questions.iter().enumerate() {
        if question.options.is_empty() {
            errors.push(format!("quiz.questions[{}].options: at least one option is required", i));
        }
        let mut keys = HashSet::new();
        for (j, option) in question.options.iter().enumerate() {
            let key = option.key.trim().to_lowercase();
            if key.is_empty() {
                errors.push(format!("quiz.questions[{}].options[{}].key: must not be empty", i, j));
            } else if !keys.insert(key) {
                errors.push(format!(
                    "quiz.questions[{}].options[{}].key: duplicate key '{}'",
                    i, j, option.key
                ));
            }
        }
    }

    if config.top_k == Some(0) {
        errors.push("quiz.top_k: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
