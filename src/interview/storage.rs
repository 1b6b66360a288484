use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Response;
use crate::store::{self, Versioned};

const LOG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PracticeSession {
    pub practiced_at: DateTime<Utc>,
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PracticeLog {
    pub version: u32,
    #[serde(default)]
    pub sessions: Vec<PracticeSession>,
}

impl Default for PracticeLog {
    fn default() -> Self {
        Self {
            version: LOG_VERSION,
            sessions: Vec::new(),
        }
    }
}

impl Versioned for PracticeLog {
    const VERSION: u32 = LOG_VERSION;

    fn version(&self) -> u32 {
        self.version
    }
}

/// Get the default practice log path (~/.config/college-fit/interview_practice.json)
pub fn get_log_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("interview_practice.json"))
}

pub fn load_log(path: &Path) -> Result<PracticeLog> {
    store::load(path, "interview practice log")
}

pub fn save_log(path: &Path, log: &PracticeLog) -> Result<()> {
    store::save(path, log, "interview practice log")
}

/// Append one session to the log stored at `path`.
pub fn append_session(path: &Path, session: PracticeSession) -> Result<()> {
    let mut log = load_log(path)?;
    log.sessions.push(session);
    save_log(path, &log)
}
