//! Comparator policy switches.

use crate::error::{RecommendError, Result};

/// Optional behaviours of the built-in comparators.
///
/// Both switches are off by default.
///
/// # Examples
///
/// ```
/// use u_recommend::compare::ComparatorPolicy;
///
/// let policy = ComparatorPolicy::default()
///     .with_affinity_miss_penalty(0.2)
///     .with_points_damping(0.8);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComparatorPolicy {
    /// Affinity subtracted per liked subject the profile does not offer.
    pub affinity_miss_penalty: Option<f64>,

    /// Factor applied to the distance from the average points once the
    /// student clears the minimum ("benefit of the doubt").
    pub points_damping: Option<f64>,
}

impl ComparatorPolicy {
    pub fn with_affinity_miss_penalty(mut self, penalty: f64) -> Self {
        self.affinity_miss_penalty = Some(penalty);
        self
    }

    pub fn with_points_damping(mut self, damping: f64) -> Self {
        self.points_damping = Some(damping);
        self
    }

    /// Validates the policy.
    pub fn validate(&self) -> Result<()> {
        if let Some(penalty) = self.affinity_miss_penalty {
            if !penalty.is_finite() || penalty < 0.0 {
                return Err(RecommendError::configuration(format!(
                    "affinity_miss_penalty must be finite and non-negative, got {penalty}"
                )));
            }
        }
        if let Some(damping) = self.points_damping {
            if !damping.is_finite() || damping <= 0.0 {
                return Err(RecommendError::configuration(format!(
                    "points_damping must be positive, got {damping}"
                )));
            }
        }
        Ok(())
    }
}
