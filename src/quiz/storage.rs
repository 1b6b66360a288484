use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Recommendation;
use crate::store::{self, Versioned};

const HISTORY_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizRecord {
    pub taken_at: DateTime<Utc>,
    pub answers: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizHistory {
    pub version: u32,
    #[serde(default)]
    pub records: Vec<QuizRecord>,
}

impl Default for QuizHistory {
    fn default() -> Self {
        Self {
            version: HISTORY_VERSION,
            records: Vec::new(),
        }
    }
}

impl Versioned for QuizHistory {
    const VERSION: u32 = HISTORY_VERSION;

    fn version(&self) -> u32 {
        self.version
    }
}

impl QuizHistory {
    pub fn last(&self) -> Option<&QuizRecord> {
        self.records.last()
    }
}

/// Get the default quiz history path (~/.config/college-fit/quiz_results.json)
pub fn get_history_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("quiz_results.json"))
}

/// Load quiz history from a JSON file
///
/// If the file doesn't exist, returns an empty history.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_history(path: &Path) -> Result<QuizHistory> {
    store::load(path, "quiz history")
}

/// Save quiz history to a JSON file atomically, creating parent directories.
pub fn save_history(path: &Path, history: &QuizHistory) -> Result<()> {
    store::save(path, history, "quiz history")
}

/// Append one record to the history stored at `path`.
pub fn append_record(path: &Path, record: QuizRecord) -> Result<()> {
    let mut history = load_history(path)?;
    history.records.push(record);
    save_history(path, &history)
}
