pub mod session;
pub mod storage;

pub use session::run_practice;
pub use storage::{append_session, get_log_path, load_log, save_log, PracticeLog, PracticeSession};

use serde::{Deserialize, Serialize};

/// Default number of questions asked per practice session
pub const DEFAULT_INTERVIEW_COUNT: usize = 5;

/// Answers under this many words are called short
pub const SHORT_ANSWER_WORDS: usize = 10;
/// Answers over this many words are called long
pub const LONG_ANSWER_WORDS: usize = 100;

pub fn default_interview_questions() -> Vec<String> {
    [
        "Tell me about yourself.",
        "Why are you interested in our college?",
        "What are your greatest strengths?",
        "What challenges have you overcome?",
        "Where do you see yourself in 10 years?",
        "Why should we accept you?",
        "What questions do you have for us?",
        "Describe a time you showed leadership.",
        "What's your biggest weakness?",
        "How do you handle stress?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Interview question bank and how many questions a session asks.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InterviewConfig {
    #[serde(default = "default_interview_questions")]
    pub questions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            questions: default_interview_questions(),
            count: Some(DEFAULT_INTERVIEW_COUNT),
        }
    }
}

impl InterviewConfig {
    pub fn effective_count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_INTERVIEW_COUNT)
    }

    /// `count` consecutive questions starting at `offset`, wrapping around
    /// the bank. Never repeats a question within one session.
    pub fn select(&self, count: usize, offset: usize) -> Vec<String> {
        let len = self.questions.len();
        if len == 0 {
            return Vec::new();
        }
        (0..count.min(len))
            .map(|i| self.questions[(offset + i) % len].clone())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Response {
    pub question: String,
    pub answer: String,
}

impl Response {
    pub fn word_count(&self) -> usize {
        self.answer.split_whitespace().count()
    }
}

/// Length feedback given after each answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    TooShort,
    GoodLength,
    TooLong,
}

impl Feedback {
    pub fn for_words(words: usize) -> Self {
        if words < SHORT_ANSWER_WORDS {
            Feedback::TooShort
        } else if words > LONG_ANSWER_WORDS {
            Feedback::TooLong
        } else {
            Feedback::GoodLength
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Feedback::TooShort => "Try to elaborate more in your response.",
            Feedback::GoodLength => "Good length for your response!",
            Feedback::TooLong => "Consider being more concise.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PracticeSummary {
    pub answered: usize,
    pub average_words: f64,
}

/// None when nothing was answered.
pub fn summarize(responses: &[Response]) -> Option<PracticeSummary> {
    if responses.is_empty() {
        return None;
    }
    let words: usize = responses.iter().map(Response::word_count).sum();
    Some(PracticeSummary {
        answered: responses.len(),
        average_words: words as f64 / responses.len() as f64,
    })
}

/// Validate the interview section. Returns all errors at once.
pub fn validate_interview(config: &InterviewConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.questions.is_empty() {
        errors.push("interview.questions: at least one question is required".to_string());
    }
    for (i, question) in config.questions.iter().enumerate() {
        if question.trim().is_empty() {
            errors.push(format!("interview.questions[{}]: must not be empty", i));
        }
    }
    if config.count == Some(0) {
        errors.push("interview.count: must be at least 1".to_string());
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

    fn response(answer: &str) -> Response {
        Response {
            question: "Tell me about yourself.".to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_select_wraps_without_repeats() {
        let config = InterviewConfig::default();
        let picked = config.select(5, 8);
        assert_eq!(
            picked,
            vec![
                "What's your biggest weakness?",
                "How do you handle stress?",
                "Tell me about yourself.",
                "Why are you interested in our college?",
                "What are your greatest strengths?",
            ]
        );
    }

    #[test]
    fn test_select_caps_at_bank_size() {
        let config = InterviewConfig {
            questions: vec!["One?".to_string(), "Two?".to_string()],
            count: None,
        };
        assert_eq!(config.select(5, 1), vec!["Two?", "One?"]);
        assert_eq!(config.effective_count(), DEFAULT_INTERVIEW_COUNT);

        let empty = InterviewConfig {
            questions: Vec::new(),
            count: None,
        };
        assert!(empty.select(3, 0).is_empty());
    }

    #[test]
    fn test_feedback_boundaries() {
        assert_eq!(Feedback::for_words(0), Feedback::TooShort);
        assert_eq!(Feedback::for_words(9), Feedback::TooShort);
        assert_eq!(Feedback::for_words(10), Feedback::GoodLength);
        assert_eq!(Feedback::for_words(100), Feedback::GoodLength);
        assert_eq!(Feedback::for_words(101), Feedback::TooLong);
    }

    #[test]
    fn test_summarize() {
        assert!(summarize(&[]).is_none());

        let summary = summarize(&[response("I grew up nearby"), response("  I   like   math today ")]).unwrap();
        assert_eq!(summary.answered, 2);
        assert!((summary.average_words - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_interview() {
        assert!(validate_interview(&InterviewConfig::default()).is_ok());

        let config = InterviewConfig {
            questions: vec!["Why us?".to_string(), "  ".to_string()],
            count: Some(0),
        };
        let errors = validate_interview(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "interview.questions[1]: must not be empty",
                "interview.count: must be at least 1",
            ]
        );

        let empty = InterviewConfig {
            questions: Vec::new(),
            count: None,
        };
        assert_eq!(validate_interview(&empty).unwrap_err().len(), 1);
    }
}
