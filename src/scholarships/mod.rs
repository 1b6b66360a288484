use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::{Candidate, FilterConfig, FilterKind, Profile};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scholarship {
    pub name: String,
    pub amount: f64,
    pub gpa_min: f64,
    pub major: String, // "Any" or a field such as "STEM"
    pub deadline: NaiveDate,
}

/// Built-in deadlines go through a `const` block, so a bad date fails the build.
const fn deadline(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid built-in scholarship deadline"),
    }
}

impl Scholarship {
    fn new(name: &str, amount: f64, gpa_min: f64, major: &str, deadline: NaiveDate) -> Self {
        Self {
            name: name.to_string(),
            amount,
            gpa_min,
            major: major.to_string(),
            deadline,
        }
    }

    pub fn to_candidate(&self) -> Candidate {
        Candidate::new(self.name.as_str())
            .with("amount", self.amount)
            .with("gpa_min", self.gpa_min)
            .with("major", self.major.as_str())
    }

    /// Days until the deadline; negative once it has passed
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }
}

pub fn default_scholarships() -> Vec<Scholarship> {
    vec![
        Scholarship::new("Merit Excellence Scholarship", 5000.0, 3.5, "Any", const { deadline(2024, 3, 15) }),
        Scholarship::new("STEM Leadership Award", 10000.0, 3.7, "STEM", const { deadline(2024, 2, 28) }),
        Scholarship::new("Community Service Grant", 2500.0, 3.0, "Any", const { deadline(2024, 4, 1) }),
        Scholarship::new(
            "Engineering Innovation Prize",
            7500.0,
            3.8,
            "Engineering",
            const { deadline(2024, 3, 30) },
        ),
        Scholarship::new("Liberal Arts Excellence", 4000.0, 3.4, "Liberal Arts", const { deadline(2024, 5, 15) }),
    ]
}

/// Eligibility rules: GPA at or above the minimum, and a matching major.
pub fn eligibility_filters() -> Vec<FilterConfig> {
    vec![
        FilterConfig::new(FilterKind::AtMost, "gpa_min").against("gpa"),
        FilterConfig::new(FilterKind::Matches, "major"),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScholarshipQuery {
    pub gpa: f64,
    /// None or "any" accepts every major
    pub major: Option<String>,
    /// Hide scholarships whose deadline is before `today`
    pub open_only: bool,
    pub today: NaiveDate,
}

impl ScholarshipQuery {
    pub fn profile(&self) -> Profile {
        let profile = Profile::new().with("gpa", self.gpa);
        match &self.major {
            Some(major) => profile.with("major", major.as_str()),
            None => profile,
        }
    }
}

/// Scholarships the query is eligible for, in table order.
pub fn find_eligible<'a>(scholarships: &'a [Scholarship], query: &ScholarshipQuery) -> Vec<&'a Scholarship> {
    let filters = eligibility_filters();
    let profile = query.profile();

    scholarships
        .iter()
        .filter(|s| {
            let candidate = s.to_candidate();
            filters.iter().all(|f| f.allows(&candidate, &profile))
        })
        .filter(|s| !query.open_only || s.deadline >= query.today)
        .collect()
}
