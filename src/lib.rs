//! benchsig - statistical significance comparator for benchmark reports
//!
//! This library loads two pytest-benchmark JSON reports, matches the
//! benchmarks they share and runs a one-tailed Welch's t-test on each,
//! splitting the results into significant and not significant at a chosen
//! alpha.

pub mod cli;
pub mod comparison;
pub mod json_output;
pub mod report_loader;
pub mod types;
