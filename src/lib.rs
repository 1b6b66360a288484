pub mod aid;
pub mod colleges;
pub mod config;
pub mod interview;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod quiz;
pub mod scholarships;
pub mod scoring;
pub mod store;
