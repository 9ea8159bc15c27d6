//! Rank-based aggregation.

use super::{accumulate, nan_last, AttributeWeights};
use crate::compare::ComparatorRegistry;
use crate::domain::{Profile, Student};
use crate::error::Result;
use std::borrow::Borrow;

/// Scores each profile by its weighted rank positions.
///
/// Per attribute, profiles are stable-sorted ascending by comparator
/// distance and each gets its 0-based position. Ties keep table order and
/// still receive distinct positions. NaN distances sort last.
///
/// # Examples
///
/// ```
/// use u_recommend::aggregate::{AttributeWeights, RankingAggregator};
///
/// let aggregator = RankingAggregator::new(AttributeWeights::uniform(["school_type"]));
/// assert_eq!(aggregator.weights().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RankingAggregator {
    weights: AttributeWeights,
}

impl RankingAggregator {
    pub fn new(weights: AttributeWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &AttributeWeights {
        &self.weights
    }

    /// Weighted mean rank of every profile, in table order.
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
        accumulate(
            "ranking",
            &self.weights,
            registry,
            student,
            profiles,
            parallel,
            |_, column| Ok(rank_positions(&column).into_iter().map(|r| r as f64).collect()),
        )
    }
}

/// 0-based rank of every element under a stable ascending sort.
///
/// ```
/// use u_recommend::aggregate::rank_positions;
///
/// assert_eq!(rank_positions(&[3.0, 1.0, 2.0]), vec![2, 0, 1]);
/// assert_eq!(rank_positions(&[1.0, 1.0]), vec![0, 1]);
/// ```
pub fn rank_positions(column: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..column.len()).collect();
    order.sort_by(|&a, &b| nan_last(column[a], column[b]));

    let mut ranks = vec![0; column.len()];
    for (position, &index) in order.iter().enumerate() {
        ranks[index] = position;
    }
    ranks
}
