// One-tailed Welch's t-test over benchmark summary statistics
//
// The test runs on (mean, stddev, rounds) summaries rather than raw
// samples. The Student's t CDF and quantile come from statrs. Past
// `NORMAL_QUANTILE_DF` degrees of freedom the quantile is taken from the
// standard normal distribution instead: statrs' t quantile loses accuracy
// there and stops converging once df reaches the tens of millions.
//
// Degenerate inputs (zero pooled standard error) are not special-cased:
// the Welch-Satterthwaite degrees of freedom evaluate to NaN, no
// t-distribution can be built, and the p-value and finite bound come out
// as NaN. Callers decide what to do with such outcomes.

use crate::comparison::config::Direction;
use crate::types::BenchmarkStats;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Degrees of freedom above which the t quantile is approximated by the
/// standard normal quantile
const NORMAL_QUANTILE_DF: f64 = 1e5;

/// Result of a one-tailed Welch's t-test with its one-sided confidence interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestOutcome {
    /// Probability of a statistic at least this extreme under the null hypothesis
    pub p_value: f64,

    /// Welch's t statistic: mean delta over pooled standard error
    pub t_statistic: f64,

    /// Welch-Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,

    /// Lower bound of the one-sided interval (-inf when testing "faster")
    pub lower_bound: f64,

    /// Upper bound of the one-sided interval (+inf when testing "slower")
    pub upper_bound: f64,

    /// Difference in sample means (first - second), in seconds
    pub mean_delta: f64,
}

impl TTestOutcome {
    /// True when the p-value could not be computed
    pub fn is_degenerate(&self) -> bool {
        !self.p_value.is_finite()
    }

    /// Significant at `alpha`: strictly `p < alpha`, so NaN is never significant
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Run a one-tailed Welch's t-test of `first` against `second`
///
/// With `Direction::Faster` the null hypothesis is `first >= second` and the
/// interval is `(-inf, upper)`; with `Direction::Slower` the null hypothesis
/// is `first <= second` and the interval is `(lower, inf)`.
///
/// `alpha` is expected to be validated already; outside (0, 1) the finite
/// bound is NaN.
///
/// # Example
/// ```
/// use benchsig::comparison::{welch_ttest, Direction};
/// use benchsig::types::BenchmarkStats;
///
/// let fast = BenchmarkStats::new(1.0, 0.1, 30).unwrap();
/// let slow = BenchmarkStats::new(1.5, 0.1, 30).unwrap();
///
/// let outcome = welch_ttest(&fast, &slow, 0.05, Direction::Faster);
/// assert!(outcome.p_value < 0.05);
/// assert!(outcome.upper_bound < 0.0);
/// assert_eq!(outcome.lower_bound, f64::NEG_INFINITY);
/// ```
pub fn welch_ttest(
    first: &BenchmarkStats,
    second: &BenchmarkStats,
    alpha: f64,
    direction: Direction,
) -> TTestOutcome {
    let df1 = first.degrees_of_freedom();
    let df2 = second.degrees_of_freedom();

    // Variance of each sample mean, not the raw sample variance
    let sample_v1 = first.mean_variance();
    let sample_v2 = second.mean_variance();

    let pooled_std_err = (sample_v1 + sample_v2).sqrt();
    let df = (sample_v1 + sample_v2).powi(2)
        / (sample_v1.powi(2) / df1 + sample_v2.powi(2) / df2);

    let mean_delta = first.mean() - second.mean();
    let t_statistic = mean_delta / pooled_std_err;

    let distribution = students_t(df);
    let cdf = |x: f64| match &distribution {
        Some(dist) if !x.is_nan() => dist.cdf(x),
        _ => f64::NAN,
    };
    let quantile = |p: f64| match &distribution {
        Some(dist) if p > 0.0 && p < 1.0 => t_quantile(dist, p),
        _ => f64::NAN,
    };

    let outcome = match direction {
        Direction::Faster => TTestOutcome {
            p_value: cdf(t_statistic),
            t_statistic,
            degrees_of_freedom: df,
            lower_bound: f64::NEG_INFINITY,
            upper_bound: mean_delta + quantile(1.0 - alpha) * pooled_std_err,
            mean_delta,
        },
        Direction::Slower => TTestOutcome {
            p_value: 1.0 - cdf(t_statistic),
            t_statistic,
            degrees_of_freedom: df,
            lower_bound: mean_delta + quantile(alpha) * pooled_std_err,
            upper_bound: f64::INFINITY,
            mean_delta,
        },
    };

    tracing::debug!(
        t = outcome.t_statistic,
        df = outcome.degrees_of_freedom,
        p = outcome.p_value,
        direction = direction.as_str(),
        "Welch's t-test"
    );

    outcome
}

/// Standard Student's t-distribution, if `df` is a valid degree of freedom
fn students_t(df: f64) -> Option<StudentsT> {
    StudentsT::new(0.0, 1.0, df).ok()
}

/// Quantile of a standard t-distribution at probability `p` in (0, 1)
fn t_quantile(dist: &StudentsT, p: f64) -> f64 {
    if dist.freedom() <= NORMAL_QUANTILE_DF {
        return dist.inverse_cdf(p);
    }

    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(mean: f64, stddev: f64, rounds: u64) -> BenchmarkStats {
        BenchmarkStats::new(mean, stddev, rounds).unwrap()
    }

    #[test]
    fn test_clearly_faster() {
        let first = stats(1.0, 0.1, 30);
        let second = stats(1.5, 0.1, 30);

        let outcome = welch_ttest(&first, &second, 0.05, Direction::Faster);

        assert!((outcome.mean_delta + 0.5).abs() < 1e-12);
        assert!(outcome.p_value < 1e-10, "p-value {}", outcome.p_value);
        assert!(outcome.upper_bound < 0.0);
        assert_eq!(outcome.lower_bound, f64::NEG_INFINITY);
    }

    #[test]
    fn test_degrees_of_freedom_equal_samples() {
        // Equal variances and sizes: df = 2 * (n - 1)
        let outcome = welch_ttest(
            &stats(1.0, 0.1, 30),
            &stats(1.5, 0.1, 30),
            0.05,
            Direction::Faster,
        );
        assert!((outcome.degrees_of_freedom - 58.0).abs() < 1e-9);
    }

    #[test]
    fn test_known_values() {
        // se = sqrt(0.01/30 * 2) = 0.0258199, t = -0.5 / se = -19.3649
        // t_{0.95, 58} = 1.67155
        let outcome = welch_ttest(
            &stats(1.0, 0.1, 30),
            &stats(1.5, 0.1, 30),
            0.05,
            Direction::Faster,
        );
        assert!((outcome.t_statistic + 19.364917).abs() < 1e-5);
        let expected_upper = -0.5 + 1.671553 * 0.025819889;
        assert!(
            (outcome.upper_bound - expected_upper).abs() < 1e-5,
            "upper bound {}",
            outcome.upper_bound
        );
    }

    #[test]
    fn test_identical_stats_half_p_value() {
        let s = stats(2.0, 0.3, 20);

        for direction in [Direction::Faster, Direction::Slower] {
            let outcome = welch_ttest(&s, &s, 0.05, direction);
            assert_eq!(outcome.mean_delta, 0.0);
            assert_eq!(outcome.t_statistic, 0.0);
            assert!((outcome.p_value - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_slower_direction_bounds() {
        let outcome = welch_ttest(
            &stats(1.5, 0.1, 30),
            &stats(1.0, 0.1, 30),
            0.05,
            Direction::Slower,
        );
        assert!(outcome.p_value < 1e-10);
        assert!(outcome.lower_bound > 0.0);
        assert_eq!(outcome.upper_bound, f64::INFINITY);
    }

    #[test]
    fn test_faster_not_significant_when_actually_slower() {
        let outcome = welch_ttest(
            &stats(1.5, 0.1, 30),
            &stats(1.0, 0.1, 30),
            0.05,
            Direction::Faster,
        );
        assert!(outcome.p_value > 0.99);
        assert!(!outcome.is_significant(0.05));
    }

    #[test]
    fn test_unequal_rounds_and_variance() {
        let outcome = welch_ttest(
            &stats(1.0, 0.5, 5),
            &stats(1.1, 0.05, 100),
            0.05,
            Direction::Faster,
        );
        // Noisy first sample dominates: df close to 4
        assert!(outcome.degrees_of_freedom > 4.0 && outcome.degrees_of_freedom < 4.1);
        assert!(!outcome.is_significant(0.05));
        assert!(outcome.upper_bound > 0.0);
    }

    #[test]
    fn test_zero_variance_is_degenerate() {
        let outcome = welch_ttest(
            &stats(1.0, 0.0, 10),
            &stats(1.0, 0.0, 10),
            0.05,
            Direction::Faster,
        );
        assert!(outcome.is_degenerate());
        assert!(outcome.upper_bound.is_nan());
        assert!(!outcome.is_significant(0.05));
    }

    #[test]
    fn test_zero_variance_different_means_is_degenerate() {
        let outcome = welch_ttest(
            &stats(1.0, 0.0, 10),
            &stats(2.0, 0.0, 10),
            0.05,
            Direction::Faster,
        );
        assert_eq!(outcome.t_statistic, f64::NEG_INFINITY);
        assert!(outcome.is_degenerate());
    }

    #[test]
    fn test_one_sided_zero_variance_is_well_defined() {
        let outcome = welch_ttest(
            &stats(1.0, 0.0, 10),
            &stats(2.0, 0.2, 10),
            0.05,
            Direction::Faster,
        );
        assert!((outcome.degrees_of_freedom - 9.0).abs() < 1e-9);
        assert!(!outcome.is_degenerate());
        assert!(outcome.is_significant(0.05));
    }

    #[test]
    fn test_large_rounds_bound_uses_normal_quantile() {
        // z_{0.95} = 1.6448536; at these df the t quantile agrees to 1e-4
        for rounds in [1_000_000u64, 10_000_000] {
            let first = stats(1e-6, 1e-7, rounds);
            let second = stats(1.001e-6, 1e-7, rounds);
            let std_err = (first.mean_variance() + second.mean_variance()).sqrt();

            let faster = welch_ttest(&first, &second, 0.05, Direction::Faster);
            let z = (faster.upper_bound - faster.mean_delta) / std_err;
            assert!((z - 1.6448536).abs() < 1e-4, "rounds {}: quantile {}", rounds, z);
            assert!(!faster.is_degenerate());

            let slower = welch_ttest(&first, &second, 0.05, Direction::Slower);
            let z = (slower.lower_bound - slower.mean_delta) / std_err;
            assert!((z + 1.6448536).abs() < 1e-4, "rounds {}: quantile {}", rounds, z);
        }
    }

    #[test]
    fn test_quantile_continuous_across_normal_cutoff() {
        let below = students_t(NORMAL_QUANTILE_DF).unwrap();
        let above = students_t(NORMAL_QUANTILE_DF * 1.0001).unwrap();
        let q_below = t_quantile(&below, 0.95);
        let q_above = t_quantile(&above, 0.95);
        assert!(q_below >= q_above);
        assert!((q_below - q_above).abs() < 1e-4);
    }

    #[test]
    fn test_p_value_equal_to_alpha_is_not_significant() {
        let outcome = TTestOutcome {
            p_value: 0.05,
            t_statistic: -1.7,
            degrees_of_freedom: 10.0,
            lower_bound: f64::NEG_INFINITY,
            upper_bound: 0.0,
            mean_delta: -0.1,
        };
        assert!(!outcome.is_significant(0.05));
    }
}
