// Configuration for the significance comparison
//
// alpha is the p-value threshold; direction selects which one-tailed
// alternative hypothesis is tested (first faster or first slower).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised by configuration validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("alpha must lie strictly within (0.0, 1.0), got {alpha}")]
    AlphaOutOfRange { alpha: f64 },
}

/// Direction of the one-tailed test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Alternative hypothesis: first mean < second mean
    #[default]
    Faster,
    /// Alternative hypothesis: first mean > second mean
    Slower,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Faster => "faster",
            Direction::Slower => "slower",
        }
    }

    pub fn is_faster(&self) -> bool {
        matches!(self, Direction::Faster)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the significance comparison
///
/// # Example
/// ```
/// use benchsig::comparison::{ComparisonConfig, Direction};
///
/// let config = ComparisonConfig::default();
/// assert_eq!(config.alpha, 0.05); // 95% confidence
/// assert_eq!(config.direction, Direction::Faster);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Significance level: a benchmark is significant iff p < alpha
    ///
    /// Must lie strictly within (0, 1).
    pub alpha: f64,

    /// Which one-tailed alternative hypothesis to test
    pub direction: Direction,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            direction: Direction::Faster,
        }
    }
}

impl ComparisonConfig {
    /// Build a validated configuration
    pub fn new(alpha: f64, direction: Direction) -> Result<Self, ConfigError> {
        let config = Self { alpha, direction };
        config.validate()?;
        Ok(config)
    }

    /// 99% confidence
    pub fn strict() -> Self {
        Self {
            alpha: 0.01,
            ..Self::default()
        }
    }

    /// 90% confidence
    pub fn permissive() -> Self {
        Self {
            alpha: 0.10,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Confidence level of the one-sided interval, in percent
    pub fn confidence_percent(&self) -> f64 {
        (1.0 - self.alpha) * 100.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_alpha(self.alpha).map(|_| ())
    }
}

/// Check that alpha lies strictly within (0, 1)
///
/// NaN is rejected as well.
pub fn validate_alpha(alpha: f64) -> Result<f64, ConfigError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err(ConfigError::AlphaOutOfRange { alpha })
    }
}
