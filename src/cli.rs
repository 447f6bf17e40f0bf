//! CLI argument parsing for benchsig

use crate::comparison::{validate_alpha, ComparisonConfig, Direction};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "benchsig")]
#[command(version)]
#[command(about = "Run Welch's t-test on benchmark results", long_about = None)]
pub struct Cli {
    /// Path to the first pytest-benchmark JSON report
    #[arg(value_name = "R1")]
    pub first_report: PathBuf,

    /// Path to the second pytest-benchmark JSON report
    #[arg(value_name = "R2")]
    pub second_report: PathBuf,

    /// Significance level of the t-test, strictly within (0.0, 1.0)
    #[arg(
        short = 'a',
        long = "alpha",
        value_name = "ALPHA",
        default_value = "0.05",
        value_parser = parse_alpha
    )]
    pub alpha: f64,

    /// Test whether the first result is slower than the second.
    /// Otherwise, test whether the first result is faster than the second.
    #[arg(long = "slower")]
    pub slower: bool,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    pub fn direction(&self) -> Direction {
        if self.slower {
            Direction::Slower
        } else {
            Direction::Faster
        }
    }

    pub fn comparison_config(&self) -> ComparisonConfig {
        ComparisonConfig {
            alpha: self.alpha,
            direction: self.direction(),
        }
    }
}

fn parse_alpha(value: &str) -> Result<f64, String> {
    let alpha: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    validate_alpha(alpha).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_reports() {
        let cli = Cli::parse_from(["benchsig", "main.json", "branch.json"]);
        assert_eq!(cli.first_report, PathBuf::from("main.json"));
        assert_eq!(cli.second_report, PathBuf::from("branch.json"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["benchsig", "a.json", "b.json"]);
        assert_eq!(cli.alpha, 0.05);
        assert!(!cli.slower);
        assert!(!cli.debug);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.direction(), Direction::Faster);
        assert_eq!(cli.comparison_config(), ComparisonConfig::default());
    }

    #[test]
    fn test_cli_alpha_short_and_long() {
        let cli = Cli::parse_from(["benchsig", "-a", "0.01", "a.json", "b.json"]);
        assert_eq!(cli.alpha, 0.01);

        let cli = Cli::parse_from(["benchsig", "--alpha", "0.1", "a.json", "b.json"]);
        assert_eq!(cli.alpha, 0.1);
    }

    #[test]
    fn test_cli_alpha_out_of_range() {
        for alpha in ["0", "1", "1.5", "-0.1", "NaN"] {
            let flag = format!("--alpha={}", alpha);
            let result = Cli::try_parse_from(["benchsig", flag.as_str(), "a.json", "b.json"]);
            let err = result.unwrap_err().to_string();
            assert!(err.contains("--alpha"), "error should name the flag: {}", err);
        }
    }

    #[test]
    fn test_cli_alpha_not_a_number() {
        let result = Cli::try_parse_from(["benchsig", "--alpha", "high", "a.json", "b.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_slower_flag() {
        let cli = Cli::parse_from(["benchsig", "--slower", "a.json", "b.json"]);
        assert!(cli.slower);
        assert_eq!(cli.direction(), Direction::Slower);
    }

    #[test]
    fn test_cli_json_format() {
        let cli = Cli::parse_from(["benchsig", "--format", "json", "a.json", "b.json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_requires_two_reports() {
        assert!(Cli::try_parse_from(["benchsig", "a.json"]).is_err());
    }
}
