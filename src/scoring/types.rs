use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw attribute or target value: either a number or a category label.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Category(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Value::Category(s) => Some(s),
            Value::Number(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Category(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Category(s)
    }
}

/// Returns true for the "any" wildcard (case-insensitive).
pub fn is_wildcard(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("any")
}

/// Something being ranked: a college, a major, a scholarship.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub attributes: BTreeMap<String, Value>,
}

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    pub fn category(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_category)
    }
}

/// The user's targets and constraints, keyed by name (desired SAT, budget ceiling, location...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    targets: BTreeMap<String, Value>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.targets.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.targets.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    pub fn category(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_category)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub label: String,       // criterion name, e.g. "sat", "budget"
    pub description: String, // e.g. "|1450 - 1400| = 50 of 300"
    pub points: f64,
    pub max: f64,
    pub missing: bool, // attribute or target absent, scored as zero
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Position of the candidate in the input slice handed to the engine
    pub index: usize,
    pub score: f64,
    pub incomplete: bool,
    pub breakdown: Vec<Contribution>,
}

impl ScoredCandidate {
    pub fn name(&self) -> &str {
        &self.candidate.name
    }
}
