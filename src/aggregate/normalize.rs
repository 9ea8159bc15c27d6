//! Column normalizations.

use crate::error::{RecommendError, Result};
use tracing::warn;

/// How a raw comparator column is brought onto a common scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Normalization {
    /// `(x - mean) / sd` with the sample standard deviation.
    #[default]
    ZScore,
    /// `(x - min) / (max - min)`, onto `[0, 1]`.
    MinMax,
}

impl Normalization {
    pub fn name(self) -> &'static str {
        match self {
            Normalization::ZScore => "zscore",
            Normalization::MinMax => "minmax",
        }
    }
}

/// What happens to a column with zero spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DegeneratePolicy {
    /// Every element becomes 0.0, so the attribute stops discriminating.
    #[default]
    Neutral,
    /// Fail with `DegenerateDistribution`.
    Error,
}

/// Edge-case handling of the normalization aggregator.
///
/// # Examples
///
/// ```
/// use u_recommend::aggregate::{DegeneratePolicy, NormalizationConfig};
///
/// let config = NormalizationConfig::default().with_degenerate(DegeneratePolicy::Error);
/// assert_eq!(config.nan_fill, 1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizationConfig {
    pub degenerate: DegeneratePolicy,

    /// Substitute for NaN comparator results before normalizing.
    pub nan_fill: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            degenerate: DegeneratePolicy::Neutral,
            nan_fill: 1.0,
        }
    }
}

impl NormalizationConfig {
    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    pub fn with_nan_fill(mut self, value: f64) -> Self {
        self.nan_fill = value;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.nan_fill.is_finite() {
            return Err(RecommendError::configuration(format!(
                "nan_fill must be finite, got {}",
                self.nan_fill
            )));
        }
        Ok(())
    }
}

/// Normalizes one attribute column.
///
/// NaN entries are replaced by `config.nan_fill` first. A column with zero
/// spread or an infinite entry, including a single-element column under
/// z-score, is degenerate and handled by `config.degenerate`. Finite
/// columns whose sums overflow are rescaled, not treated as degenerate.
/// The result never contains NaN.
pub fn normalize(
    column: &[f64],
    attribute: &str,
    method: Normalization,
    config: &NormalizationConfig,
) -> Result<Vec<f64>> {
    let nan_count = column.iter().filter(|x| x.is_nan()).count();
    if nan_count > 0 {
        warn!(attribute, nan_count, fill = config.nan_fill, "replacing NaN comparator results");
    }
    let values: Vec<f64> = column
        .iter()
        .map(|&x| if x.is_nan() { config.nan_fill } else { x })
        .collect();

    if values.is_empty() {
        return Ok(values);
    }

    let scaled = match method {
        Normalization::ZScore => z_score(&values),
        Normalization::MinMax => min_max(&values),
    };

    match scaled {
        Some(v) => Ok(v),
        None => match config.degenerate {
            DegeneratePolicy::Neutral => {
                warn!(
                    attribute,
                    normalization = method.name(),
                    "no finite spread, substituting neutral scores"
                );
                Ok(vec![0.0; values.len()])
            }
            DegeneratePolicy::Error => Err(RecommendError::DegenerateDistribution {
                attribute: attribute.to_string(),
                normalization: method.name(),
            }),
        },
    }
}

fn z_score(values: &[f64]) -> Option<Vec<f64>> {
    // the float mean of equal values can differ from them in the last bit
    if values.len() < 2 || values.iter().all(|&x| x == values[0]) {
        return None;
    }
    if values.iter().any(|x| !x.is_finite()) {
        return None;
    }
    if let Some((mean, sd)) = moments(values) {
        return Some(values.iter().map(|x| (x - mean) / sd).collect());
    }

    // the moments overflowed; z-scores do not change under scaling
    let scale = values.iter().fold(0.0f64, |m, x| m.max(x.abs()));
    let scaled: Vec<f64> = values.iter().map(|x| x / scale).collect();
    let (mean, sd) = moments(&scaled)?;
    Some(scaled.iter().map(|x| (x - mean) / sd).collect())
}

/// Mean and sample standard deviation, if both are finite and the
/// deviation is positive.
fn moments(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let sd = var.sqrt();
    (mean.is_finite() && sd.is_finite() && sd > 0.0).then_some((mean, sd))
}

fn min_max(values: &[f64]) -> Option<Vec<f64>> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() || max == min {
        return None;
    }
    let range = max - min;
    if range.is_finite() {
        return Some(values.iter().map(|x| (x - min) / range).collect());
    }

    // halving every term keeps the ratios and brings the range back in
    let half = max / 2.0 - min / 2.0;
    Some(values.iter().map(|x| (x / 2.0 - min / 2.0) / half).collect())
}
