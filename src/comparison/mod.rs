// Statistical significance comparison of two benchmark reports
//
// Replaces eyeballing mean timings with a one-tailed Welch's t-test per
// benchmark: does the first report show a significantly faster (or slower)
// mean than the second at the chosen alpha?
//
// Pipeline:
// - matcher: split benchmark ids into first-only, second-only and shared
// - statistics: Welch's t-test and one-sided confidence interval per shared id
// - verdict: classify at alpha and render the report blocks
//
// The t-distribution CDF and quantile come from statrs.

mod config;
mod matcher;
mod statistics;
mod verdict;

pub use config::{validate_alpha, ComparisonConfig, ConfigError, Direction};
pub use matcher::{match_benchmarks, match_notices, BenchmarkMatch, MatchNotice};
pub use statistics::{welch_ttest, TTestOutcome};
pub use verdict::{
    classify, compare, format_bound, ComparisonReport, ComparisonVerdict, SignificancePartition,
};
