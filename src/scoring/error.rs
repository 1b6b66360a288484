use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    /// Every problem found in the configuration, in dotted-path form
    #[error("invalid scoring configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
}

impl ScoringError {
    pub fn problems(&self) -> &[String] {
        match self {
            ScoringError::InvalidConfig(errors) => errors,
        }
    }
}
