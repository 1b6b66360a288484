use serde::{Deserialize, Serialize};

use crate::aid::AidConfig;
use crate::colleges::{default_colleges, College};
use crate::interview::InterviewConfig;
use crate::quiz::QuizConfig;
use crate::scholarships::{default_scholarships, Scholarship};
use crate::scoring::ScoringConfig;

/// Top-level config file. Every section is optional; missing sections use
/// the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// College comparison scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colleges: Option<Vec<College>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholarships: Option<Vec<Scholarship>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aid: Option<AidConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview: Option<InterviewConfig>,
}

impl Config {
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn effective_colleges(&self) -> Vec<College> {
        self.colleges.clone().unwrap_or_else(default_colleges)
    }

    pub fn effective_scholarships(&self) -> Vec<Scholarship> {
        self.scholarships.clone().unwrap_or_else(default_scholarships)
    }

    pub fn effective_quiz(&self) -> QuizConfig {
        self.quiz.clone().unwrap_or_default()
    }

    pub fn effective_aid(&self) -> AidConfig {
        self.aid.clone().unwrap_or_default()
    }

    pub fn effective_interview(&self) -> InterviewConfig {
        self.interview.clone().unwrap_or_default()
    }
}
