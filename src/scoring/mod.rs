pub mod accumulator;
pub mod config;
pub mod engine;
pub mod error;
pub mod factors;
pub mod filter;
pub mod ranking;
pub mod types;
pub mod validation;

pub use accumulator::{Accumulator, Selection};
pub use config::*;
pub use engine::{Criterion, ScoringEngine};
pub use error::ScoringError;
pub use factors::RangeOp;
pub use filter::{filter_candidates, FilterConfig, FilterKind};
pub use ranking::top_k;
pub use types::{is_wildcard, Candidate, Contribution, Profile, ScoredCandidate, Value};
pub use validation::validate_scoring;
