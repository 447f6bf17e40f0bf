// Significance verdict and report rendering
//
// Ties the comparison together: match the two result sets, test every
// shared benchmark, split the outcomes at alpha and render the result as
// fixed-width text blocks.

use crate::comparison::config::ComparisonConfig;
use crate::comparison::matcher::{match_benchmarks, match_notices, MatchNotice};
use crate::comparison::statistics::{welch_ttest, TTestOutcome};
use crate::types::{BenchmarkId, ResultSet};
use std::collections::BTreeMap;

/// Outcomes split by significance at a given alpha
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignificancePartition {
    /// Benchmarks with `p < alpha`
    pub significant: BTreeMap<BenchmarkId, TTestOutcome>,

    /// Every other tested benchmark, including degenerate ones
    pub not_significant: BTreeMap<BenchmarkId, TTestOutcome>,
}

impl SignificancePartition {
    pub fn len(&self) -> usize {
        self.significant.len() + self.not_significant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Terminal state of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonVerdict {
    /// The result sets share no benchmark; nothing was tested
    NoOverlap,

    /// Every shared benchmark was tested and classified
    Tested(SignificancePartition),
}

/// Structured result of comparing two result sets
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub first_label: String,
    pub second_label: String,
    pub config: ComparisonConfig,

    /// Mismatch and no-overlap notices, in emission order
    pub notices: Vec<MatchNotice>,

    pub verdict: ComparisonVerdict,
}

/// Split outcomes into significant (`p < alpha`) and not significant
pub fn classify(
    outcomes: BTreeMap<BenchmarkId, TTestOutcome>,
    alpha: f64,
) -> SignificancePartition {
    let mut partition = SignificancePartition::default();

    for (id, outcome) in outcomes {
        if outcome.is_significant(alpha) {
            partition.significant.insert(id, outcome);
        } else {
            partition.not_significant.insert(id, outcome);
        }
    }

    partition
}

/// Compare `first` against `second` under `config`
///
/// `config` must already be validated.
///
/// # Example
/// ```
/// use benchsig::comparison::{compare, ComparisonConfig, ComparisonVerdict};
/// use benchsig::types::{BenchmarkId, BenchmarkStats, ResultSet};
///
/// let id = BenchmarkId::new("decode", "small");
/// let first = ResultSet::new("branch")
///     .with(id.clone(), BenchmarkStats::new(1.0, 0.1, 30).unwrap())
///     .unwrap();
/// let second = ResultSet::new("main")
///     .with(id.clone(), BenchmarkStats::new(1.5, 0.1, 30).unwrap())
///     .unwrap();
///
/// let report = compare(&first, &second, &ComparisonConfig::default());
/// match report.verdict {
///     ComparisonVerdict::Tested(partition) => assert!(partition.significant.contains_key(&id)),
///     ComparisonVerdict::NoOverlap => unreachable!(),
/// }
/// ```
pub fn compare(
    first: &ResultSet,
    second: &ResultSet,
    config: &ComparisonConfig,
) -> ComparisonReport {
    let matched = match_benchmarks(first, second);
    let notices = match_notices(first, second, &matched);

    let verdict = if matched.has_overlap() {
        let mut outcomes = BTreeMap::new();
        // `both` is the intersection of the two key sets, so every id has
        // stats on each side
        let pairs = matched
            .both
            .into_iter()
            .filter_map(|id| Some((first.get(&id).zip(second.get(&id))?, id)));
        for ((stat1, stat2), id) in pairs {
            let outcome = welch_ttest(stat1, stat2, config.alpha, config.direction);
            if outcome.is_degenerate() {
                tracing::warn!(
                    "Welch's t-test for {} is degenerate (p-value {}); treating as not significant",
                    id,
                    outcome.p_value
                );
            }
            outcomes.insert(id, outcome);
        }

        ComparisonVerdict::Tested(classify(outcomes, config.alpha))
    } else {
        ComparisonVerdict::NoOverlap
    };

    ComparisonReport {
        first_label: first.label().to_string(),
        second_label: second.label().to_string(),
        config: *config,
        notices,
        verdict,
    }
}

impl ComparisonReport {
    pub fn partition(&self) -> Option<&SignificancePartition> {
        match &self.verdict {
            ComparisonVerdict::Tested(partition) => Some(partition),
            ComparisonVerdict::NoOverlap => None,
        }
    }

    pub fn is_no_overlap(&self) -> bool {
        matches!(self.verdict, ComparisonVerdict::NoOverlap)
    }

    /// Benchmarks whose p-value could not be computed
    pub fn degenerate(&self) -> Vec<&BenchmarkId> {
        let Some(partition) = self.partition() else {
            return Vec::new();
        };

        let mut ids: Vec<&BenchmarkId> = partition
            .significant
            .iter()
            .chain(partition.not_significant.iter())
            .filter(|(_, outcome)| outcome.is_degenerate())
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    /// Rendered report blocks: not significant first, then significant
    ///
    /// Empty partitions produce no block.
    pub fn blocks(&self) -> Vec<String> {
        let Some(partition) = self.partition() else {
            return Vec::new();
        };

        let mut blocks = Vec::new();
        if !partition.not_significant.is_empty() {
            blocks.push(self.render_block(false, &partition.not_significant));
        }
        if !partition.significant.is_empty() {
            blocks.push(self.render_block(true, &partition.significant));
        }
        blocks
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        for block in self.blocks() {
            report.push_str(&block);
            report.push('\n');
        }
        report
    }

    fn render_block(
        &self,
        significant: bool,
        outcomes: &BTreeMap<BenchmarkId, TTestOutcome>,
    ) -> String {
        let order = self.config.direction.as_str();
        let mut block = if significant {
            format!(
                "The following benchmark results show that {} is statistically significant {} than {}.",
                self.first_label, order, self.second_label
            )
        } else {
            format!(
                "The following benchmark results does NOT show that {} is statistically significant {} than {}.",
                self.first_label, order, self.second_label
            )
        };

        block.push('\n');
        block.push_str(&table_row(
            "Benchmark test (group::name)",
            "Mean delta in second",
            &format!(
                "{}% confidence interval of mean delta",
                format_percent(self.config.confidence_percent())
            ),
        ));

        // BTreeMap iteration is already (group, name) order
        for (id, outcome) in outcomes {
            block.push('\n');
            block.push_str(&table_row(
                &id.to_string(),
                &format!("{:.5}", outcome.mean_delta),
                &format!(
                    "({}, {})",
                    format_bound(outcome.lower_bound),
                    format_bound(outcome.upper_bound)
                ),
            ));
        }

        block
    }
}

fn table_row(benchmark: &str, mean_delta: &str, interval: &str) -> String {
    format!("\t{:55}{:25}{:40}", benchmark, mean_delta, interval)
        .trim_end()
        .to_string()
}

/// Format an interval bound: 5 decimals, or `inf` / `-inf` / `nan`
pub fn format_bound(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{:.5}", value)
    }
}

fn format_percent(percent: f64) -> String {
    format!("{}", (percent * 1e6).round() / 1e6)
}
