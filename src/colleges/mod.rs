use serde::{Deserialize, Serialize};

use crate::scoring::{Candidate, Profile, ScoredCandidate, ScoringEngine};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct College {
    pub name: String,
    pub tuition: f64,         // Annual tuition in dollars
    pub sat_avg: f64,
    pub acceptance_rate: f64, // 0.0 - 1.0
    pub location: String,     // State abbreviation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>, // "Small", "Medium", "Large"
}

impl College {
    fn new(name: &str, tuition: f64, sat_avg: f64, acceptance_rate: f64, location: &str, size: &str) -> Self {
        Self {
            name: name.to_string(),
            tuition,
            sat_avg,
            acceptance_rate,
            location: location.to_string(),
            size: Some(size.to_string()),
        }
    }

    /// Attributes exposed to the scoring engine
    pub fn to_candidate(&self) -> Candidate {
        let candidate = Candidate::new(self.name.as_str())
            .with("tuition", self.tuition)
            .with("sat_avg", self.sat_avg)
            .with("acceptance_rate", self.acceptance_rate)
            .with("location", self.location.as_str());
        match &self.size {
            Some(size) => candidate.with("size", size.as_str()),
            None => candidate,
        }
    }
}

/// Built-in sample table used when the config does not provide colleges.
pub fn default_colleges() -> Vec<College> {
    vec![
        College::new("State University", 25000.0, 1250.0, 0.65, "CA", "Large"),
        College::new("Tech Institute", 45000.0, 1450.0, 0.25, "MA", "Medium"),
        College::new("Liberal Arts College", 35000.0, 1350.0, 0.45, "NY", "Small"),
        College::new("Community College", 8000.0, 1050.0, 0.90, "TX", "Medium"),
        College::new("Elite University", 55000.0, 1520.0, 0.15, "CT", "Large"),
    ]
}

/// What the user brings to a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareRequest {
    pub sat: f64,
    pub budget: f64,
    /// State abbreviation; None or "any" disables the location filter
    pub location: Option<String>,
}

impl CompareRequest {
    pub fn profile(&self) -> Profile {
        let profile = Profile::new().with("sat", self.sat).with("budget", self.budget);
        match &self.location {
            Some(location) => profile.with("location", location.as_str()),
            None => profile,
        }
    }
}

/// A ranked college with its scoring result.
#[derive(Debug, Clone)]
pub struct CollegeMatch<'a> {
    pub college: &'a College,
    pub result: ScoredCandidate,
}

/// Rank `colleges` for `request`, best fit first, at most `k` results.
pub fn compare<'a>(
    colleges: &'a [College],
    engine: &ScoringEngine,
    request: &CompareRequest,
    k: usize,
) -> Vec<CollegeMatch<'a>> {
    let candidates: Vec<Candidate> = colleges.iter().map(College::to_candidate).collect();

    engine
        .rank(&candidates, &request.profile(), k)
        .into_iter()
        .map(|result| CollegeMatch {
            college: &colleges[result.index],
            result,
        })
        .collect()
}
