//! Aggregation of per-attribute comparator results.
//!
//! An aggregator turns the comparator columns of one student against the
//! whole profile table into one score per profile (lower is better):
//!
//! - [`RankingAggregator`]: rank position per attribute.
//! - [`NormalizationAggregator`]: z-score or min-max normalized distance
//!   per attribute.
//!
//! Both accumulate `value * weight * preference` per attribute and divide
//! by the weight sum. Every call builds fresh score vectors.

mod normalization;
mod normalize;
mod ranking;
mod weights;

pub use normalization::NormalizationAggregator;
pub use normalize::{normalize, DegeneratePolicy, Normalization, NormalizationConfig};
pub use ranking::{rank_positions, RankingAggregator};
pub use weights::AttributeWeights;

use crate::compare::ComparatorRegistry;
use crate::domain::{Profile, Student};
use crate::error::{RecommendError, Result};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Aggregation strategy selector.
///
/// Parsed from the names `ranking`, `normalization` (z-score), `zscore`
/// and `minmax`.
///
/// ```
/// use u_recommend::aggregate::Strategy;
///
/// assert_eq!("normalization".parse::<Strategy>().unwrap(), Strategy::ZScore);
/// assert!("borda".parse::<Strategy>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Strategy {
    Ranking,
    ZScore,
    MinMax,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Ranking => "ranking",
            Strategy::ZScore => "zscore",
            Strategy::MinMax => "minmax",
        }
    }
}

impl FromStr for Strategy {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ranking" | "rank" => Ok(Strategy::Ranking),
            "normalization" | "zscore" | "z-score" => Ok(Strategy::ZScore),
            "minmax" | "min-max" => Ok(Strategy::MinMax),
            other => Err(RecommendError::configuration(format!(
                "unknown aggregator `{other}` (expected one of: ranking, normalization, zscore, minmax)"
            ))),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = RecommendError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.name().to_string()
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A configured aggregator.
#[derive(Debug, Clone)]
pub enum Aggregator {
    Ranking(RankingAggregator),
    Normalization(NormalizationAggregator),
}

impl Aggregator {
    /// Builds the aggregator for `strategy`.
    pub fn new(strategy: Strategy, weights: AttributeWeights, config: NormalizationConfig) -> Self {
        match strategy {
            Strategy::Ranking => Aggregator::Ranking(RankingAggregator::new(weights)),
            Strategy::ZScore => Aggregator::Normalization(
                NormalizationAggregator::new(Normalization::ZScore, weights).with_config(config),
            ),
            Strategy::MinMax => Aggregator::Normalization(
                NormalizationAggregator::new(Normalization::MinMax, weights).with_config(config),
            ),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Aggregator::Ranking(_) => Strategy::Ranking,
            Aggregator::Normalization(a) => match a.method() {
                Normalization::ZScore => Strategy::ZScore,
                Normalization::MinMax => Strategy::MinMax,
            },
        }
    }

    pub fn weights(&self) -> &AttributeWeights {
        match self {
            Aggregator::Ranking(a) => a.weights(),
            Aggregator::Normalization(a) => a.weights(),
        }
    }

    /// One score per profile, in table order.
    pub fn score(
        &self,
        registry: &ComparatorRegistry,
        student: &Student,
        profiles: &[Profile],
    ) -> Result<Vec<f64>> {
        self.score_with(registry, student, profiles, false)
    }

    pub(crate) fn score_with<P: Borrow<Profile> + Sync>(
        &self,
        registry: &ComparatorRegistry,
        student: &Student,
        profiles: &[P],
        parallel: bool,
    ) -> Result<Vec<f64>> {
        match self {
            Aggregator::Ranking(a) => a.score_with(registry, student, profiles, parallel),
            Aggregator::Normalization(a) => a.score_with(registry, student, profiles, parallel),
        }
    }
}

/// Ascending order with NaN after every number.
pub(crate) fn nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Shared accumulation loop of both aggregators.
///
/// For each attribute with a non-zero weight, fetches the raw column,
/// applies `transform`, and adds `value * weight * preference` to the
/// profile's score. The total is divided by the weight sum. Columns may be
/// computed on the rayon pool; the fan-in keeps attribute order.
pub(crate) fn accumulate<P, F>(
    kind: &'static str,
    weights: &AttributeWeights,
    registry: &ComparatorRegistry,
    student: &Student,
    profiles: &[P],
    parallel: bool,
    transform: F,
) -> Result<Vec<f64>>
where
    P: Borrow<Profile> + Sync,
    F: Fn(&str, Vec<f64>) -> Result<Vec<f64>> + Sync,
{
    weights.validate()?;
    weights.check_registered(registry)?;

    let active: Vec<(&str, f64)> = weights.iter().filter(|&(_, w)| w > 0.0).collect();

    let column = |&(attribute, weight): &(&str, f64)| -> Result<Vec<f64>> {
        debug!(aggregator = kind, attribute, weight, "scoring attribute");
        let raw = registry.column_of(attribute, student, profiles)?;
        let values = transform(attribute, raw)?;
        let factor = weight * student.attribute_preference(attribute);
        Ok(values.into_iter().map(|v| v * factor).collect())
    };

    let columns: Vec<Vec<f64>> = if parallel {
        parallel_columns(&active, &column)?
    } else {
        active.iter().map(&column).collect::<Result<_>>()?
    };

    let mut scores = vec![0.0; profiles.len()];
    for col in &columns {
        for (score, v) in scores.iter_mut().zip(col) {
            *score += v;
        }
    }

    let total = weights.sum();
    for score in &mut scores {
        *score /= total;
    }
    Ok(scores)
}

#[cfg(feature = "parallel")]
fn parallel_columns<F>(active: &[(&str, f64)], column: &F) -> Result<Vec<Vec<f64>>>
where
    F: Fn(&(&str, f64)) -> Result<Vec<f64>> + Sync,
{
    active.par_iter().map(column).collect()
}

#[cfg(not(feature = "parallel"))]
fn parallel_columns<F>(active: &[(&str, f64)], column: &F) -> Result<Vec<Vec<f64>>>
where
    F: Fn(&(&str, f64)) -> Result<Vec<f64>>,
{
    active.iter().map(column).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::SCHOOL_TYPE;
    use crate::testing::{build_student, student, typed_profiles};

    #[test]
    fn test_strategy_selectors() {
        assert_eq!("ranking".parse::<Strategy>().unwrap(), Strategy::Ranking);
        assert_eq!(" MinMax ".parse::<Strategy>().unwrap(), Strategy::MinMax);
        assert_eq!("zscore".parse::<Strategy>().unwrap(), Strategy::ZScore);
        let err = "pareto".parse::<Strategy>().unwrap_err();
        assert!(err.to_string().contains("pareto"));
    }

    #[test]
    fn test_nan_last() {
        let mut v = vec![f64::NAN, 2.0, 1.0];
        v.sort_by(|a, b| nan_last(*a, *b));
        assert_eq!(&v[..2], &[1.0, 2.0]);
        assert!(v[2].is_nan());
    }

    #[test]
    fn test_aggregator_strategy_roundtrip() {
        let weights = AttributeWeights::uniform([SCHOOL_TYPE]);
        for strategy in [Strategy::Ranking, Strategy::ZScore, Strategy::MinMax] {
            let agg = Aggregator::new(strategy, weights.clone(), NormalizationConfig::default());
            assert_eq!(agg.strategy(), strategy);
        }
    }

    #[test]
    fn test_preference_scales_attribute() {
        let registry = ComparatorRegistry::standard();
        let profiles = typed_profiles(&[0, 2]);
        let weights = AttributeWeights::uniform([SCHOOL_TYPE]);
        let agg = Aggregator::new(Strategy::MinMax, weights, NormalizationConfig::default());

        let plain = agg
            .score(&registry, &build_student(student()), &profiles)
            .unwrap();
        let doubled = agg
            .score(
                &registry,
                &build_student(student().with_attribute_preference(SCHOOL_TYPE, 2.0)),
                &profiles,
            )
            .unwrap();
        assert_eq!(plain, vec![0.0, 1.0]);
        assert_eq!(doubled, vec![0.0, 2.0]);
    }

    #[test]
    fn test_zero_weight_attribute_is_skipped() {
        // exam_scores is constant here; under the strict policy it would fail
        let registry = ComparatorRegistry::standard();
        let profiles = typed_profiles(&[0, 1]);
        let weights = AttributeWeights::from_pairs([(SCHOOL_TYPE, 1.0), ("exam_scores", 0.0)]);
        let agg = Aggregator::new(
            Strategy::ZScore,
            weights,
            NormalizationConfig::default().with_degenerate(DegeneratePolicy::Error),
        );
        assert!(agg.score(&registry, &build_student(student()), &profiles).is_ok());
    }
}
