//! JSON output format for comparison reports
//!
//! `--format json` implementation. Unbounded interval sides and values
//! that could not be computed serialize as `null`.

use crate::comparison::{ComparisonReport, Direction, TTestOutcome};
use crate::types::BenchmarkId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One tested benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBenchmarkResult {
    /// Display name (`group::name`)
    pub benchmark: String,
    pub group: String,
    pub name: String,
    pub p_value: Option<f64>,
    pub t_statistic: Option<f64>,
    pub degrees_of_freedom: Option<f64>,
    /// Difference in means (first - second), seconds
    pub mean_delta: f64,
    /// `None` when the interval is unbounded below
    pub lower_bound: Option<f64>,
    /// `None` when the interval is unbounded above
    pub upper_bound: Option<f64>,
}

/// Complete comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonComparisonReport {
    pub first_label: String,
    pub second_label: String,
    pub alpha: f64,
    pub direction: Direction,
    /// Rendered mismatch / no-overlap notices
    pub notices: Vec<String>,
    pub no_overlap: bool,
    pub significant: Vec<JsonBenchmarkResult>,
    pub not_significant: Vec<JsonBenchmarkResult>,
}

impl JsonBenchmarkResult {
    fn new(id: &BenchmarkId, outcome: &TTestOutcome) -> Self {
        Self {
            benchmark: id.to_string(),
            group: id.group.clone(),
            name: id.name.clone(),
            p_value: finite(outcome.p_value),
            t_statistic: finite(outcome.t_statistic),
            degrees_of_freedom: finite(outcome.degrees_of_freedom),
            mean_delta: outcome.mean_delta,
            lower_bound: finite(outcome.lower_bound),
            upper_bound: finite(outcome.upper_bound),
        }
    }
}

impl From<&ComparisonReport> for JsonComparisonReport {
    fn from(report: &ComparisonReport) -> Self {
        let rows = |outcomes: &BTreeMap<BenchmarkId, TTestOutcome>| {
            outcomes
                .iter()
                .map(|(id, outcome)| JsonBenchmarkResult::new(id, outcome))
                .collect::<Vec<_>>()
        };

        let (significant, not_significant) = match report.partition() {
            Some(partition) => (rows(&partition.significant), rows(&partition.not_significant)),
            None => (Vec::new(), Vec::new()),
        };

        Self {
            first_label: report.first_label.clone(),
            second_label: report.second_label.clone(),
            alpha: report.config.alpha,
            direction: report.config.direction,
            notices: report.notices.iter().map(ToString::to_string).collect(),
            no_overlap: report.is_no_overlap(),
            significant,
            not_significant,
        }
    }
}

impl JsonComparisonReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
