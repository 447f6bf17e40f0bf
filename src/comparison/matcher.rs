// Benchmark matching between two result sets
//
// Only benchmarks present in both sets are compared. Benchmarks found in
// just one set are reported as notices; an empty intersection ends the
// comparison without running any test.

use crate::types::{BenchmarkId, ResultSet};
use std::collections::BTreeSet;
use std::fmt;

/// Non-fatal observation made while matching two result sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchNotice {
    /// Benchmarks present in `present_in` but absent from `absent_from`
    MissingBenchmarks {
        present_in: String,
        absent_from: String,
        benchmarks: Vec<BenchmarkId>,
    },

    /// The two result sets share no benchmark
    NoOverlap { first: String, second: String },
}

impl fmt::Display for MatchNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchNotice::MissingBenchmarks {
                present_in,
                absent_from,
                benchmarks,
            } => {
                write!(
                    f,
                    "Found following benchmarks in {} but not in {}.",
                    present_in, absent_from
                )?;
                for id in benchmarks {
                    write!(f, "\n\t{}", id)?;
                }
                Ok(())
            }
            MatchNotice::NoOverlap { first, second } => write!(
                f,
                "Benchmark results in {} and {} have no intersection.",
                first, second
            ),
        }
    }
}

/// Set structure of two result sets' benchmark ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkMatch {
    pub only_first: BTreeSet<BenchmarkId>,
    pub only_second: BTreeSet<BenchmarkId>,
    pub both: BTreeSet<BenchmarkId>,
}

impl BenchmarkMatch {
    pub fn has_overlap(&self) -> bool {
        !self.both.is_empty()
    }
}

/// Split the ids of two result sets into first-only, second-only and shared
pub fn match_benchmarks(first: &ResultSet, second: &ResultSet) -> BenchmarkMatch {
    let first_ids = first.ids();
    let second_ids = second.ids();

    BenchmarkMatch {
        only_first: first_ids.difference(&second_ids).cloned().collect(),
        only_second: second_ids.difference(&first_ids).cloned().collect(),
        both: first_ids.intersection(&second_ids).cloned().collect(),
    }
}

/// Notices describing a match, in emission order
///
/// One notice per non-empty one-sided set (first-only before second-only),
/// then a no-overlap notice if nothing is shared. Benchmarks are listed in
/// `(group, name)` order.
pub fn match_notices(
    first: &ResultSet,
    second: &ResultSet,
    matched: &BenchmarkMatch,
) -> Vec<MatchNotice> {
    let mut notices = Vec::new();

    if !matched.only_first.is_empty() {
        notices.push(MatchNotice::MissingBenchmarks {
            present_in: first.label().to_string(),
            absent_from: second.label().to_string(),
            benchmarks: matched.only_first.iter().cloned().collect(),
        });
    }

    if !matched.only_second.is_empty() {
        notices.push(MatchNotice::MissingBenchmarks {
            present_in: second.label().to_string(),
            absent_from: first.label().to_string(),
            benchmarks: matched.only_second.iter().cloned().collect(),
        });
    }

    if !matched.has_overlap() {
        notices.push(MatchNotice::NoOverlap {
            first: first.label().to_string(),
            second: second.label().to_string(),
        });
    }

    for notice in &notices {
        tracing::warn!("{}", notice);
    }

    notices
}
