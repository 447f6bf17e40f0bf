//! Domain types for benchmark comparison
//!
//! A `ResultSet` is one labelled benchmark report: a map from
//! `BenchmarkId` (group + name) to the summary statistics recorded for it.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Errors raised when constructing benchmark statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("rounds must be >= 2 for a t-test, got {rounds}")]
    TooFewRounds { rounds: u64 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("stddev must be non-negative, got {stddev}")]
    NegativeStddev { stddev: f64 },

    #[error("duplicate benchmark {0}")]
    DuplicateBenchmark(BenchmarkId),
}

/// Identity of a benchmark test: the group it belongs to and its name
///
/// Ordering is lexicographic on `(group, name)`, which is the order used
/// everywhere benchmarks are listed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BenchmarkId {
    pub group: String,
    pub name: String,
}

impl BenchmarkId {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for BenchmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.group, self.name)
    }
}

/// Summary statistics of one benchmark run (times in seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkStats {
    mean: f64,
    stddev: f64,
    rounds: u64,
}

impl BenchmarkStats {
    /// Validate and build benchmark statistics
    ///
    /// `rounds` must be at least 2: the t-test divides by `rounds - 1`.
    pub fn new(mean: f64, stddev: f64, rounds: u64) -> Result<Self, StatsError> {
        if !mean.is_finite() {
            return Err(StatsError::NonFinite { field: "mean" });
        }
        if !stddev.is_finite() {
            return Err(StatsError::NonFinite { field: "stddev" });
        }
        if stddev < 0.0 {
            return Err(StatsError::NegativeStddev { stddev });
        }
        if rounds < 2 {
            return Err(StatsError::TooFewRounds { rounds });
        }

        Ok(Self {
            mean,
            stddev,
            rounds,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Estimated variance of the sample mean (stddev² / rounds)
    pub fn mean_variance(&self) -> f64 {
        self.stddev * self.stddev / self.rounds as f64
    }

    /// Degrees of freedom of the sample (rounds - 1)
    pub fn degrees_of_freedom(&self) -> f64 {
        (self.rounds - 1) as f64
    }
}

/// A labelled set of benchmark results loaded from one report
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    label: String,
    results: BTreeMap<BenchmarkId, BenchmarkStats>,
}

impl ResultSet {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            results: BTreeMap::new(),
        }
    }

    /// Add a benchmark; a second entry with the same id is rejected
    pub fn insert(&mut self, id: BenchmarkId, stats: BenchmarkStats) -> Result<(), StatsError> {
        match self.results.entry(id) {
            btree_map::Entry::Occupied(entry) => {
                Err(StatsError::DuplicateBenchmark(entry.key().clone()))
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(stats);
                Ok(())
            }
        }
    }

    /// Builder-style insert for tests and fixtures
    pub fn with(mut self, id: BenchmarkId, stats: BenchmarkStats) -> Result<Self, StatsError> {
        self.insert(id, stats)?;
        Ok(self)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn get(&self, id: &BenchmarkId) -> Option<&BenchmarkStats> {
        self.results.get(id)
    }

    pub fn ids(&self) -> BTreeSet<BenchmarkId> {
        self.results.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
