//! pytest-benchmark JSON report loading
//!
//! Reads the `benchmarks` array of a pytest-benchmark report into a
//! `ResultSet`. Only `group`, `name` and `stats.{mean,stddev,rounds}` are
//! read; every other field in the report is ignored.

use crate::types::{BenchmarkId, BenchmarkStats, ResultSet, StatsError};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while parsing report contents
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid statistics for {id}: {source}")]
    InvalidStatistics {
        id: BenchmarkId,
        #[source]
        source: StatsError,
    },

    #[error("benchmark {0} appears more than once")]
    DuplicateBenchmark(BenchmarkId),
}

/// Errors raised while loading a report file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("benchmark report not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read benchmark report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed benchmark report {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ReportError,
    },
}

#[derive(Debug, Deserialize)]
struct RawReport {
    benchmarks: Vec<RawBenchmark>,
}

#[derive(Debug, Deserialize)]
struct RawBenchmark {
    // pytest-benchmark writes `null` for tests without a group
    #[serde(default)]
    group: Option<String>,
    name: String,
    stats: RawStats,
}

#[derive(Debug, Deserialize)]
struct RawStats {
    mean: f64,
    stddev: f64,
    rounds: u64,
}

/// Derive the display label of a report: its file name without extension
pub fn report_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse report contents into a `ResultSet` with the given label
pub fn parse_result_set(label: &str, contents: &str) -> Result<ResultSet, ReportError> {
    let report: RawReport = serde_json::from_str(contents)?;

    let mut result_set = ResultSet::new(label);
    for benchmark in report.benchmarks {
        let id = BenchmarkId::new(benchmark.group.unwrap_or_default(), benchmark.name);
        let stats = BenchmarkStats::new(
            benchmark.stats.mean,
            benchmark.stats.stddev,
            benchmark.stats.rounds,
        )
        .map_err(|source| ReportError::InvalidStatistics {
            id: id.clone(),
            source,
        })?;

        result_set.insert(id.clone(), stats).map_err(|err| match err {
            StatsError::DuplicateBenchmark(id) => ReportError::DuplicateBenchmark(id),
            source => ReportError::InvalidStatistics { id, source },
        })?;
    }

    tracing::debug!(
        label,
        benchmarks = result_set.len(),
        "Parsed benchmark report"
    );

    Ok(result_set)
}

/// Load a pytest-benchmark JSON report from disk
pub fn load_result_set<P: AsRef<Path>>(path: P) -> Result<ResultSet, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_result_set(&report_label(path), &contents).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}
