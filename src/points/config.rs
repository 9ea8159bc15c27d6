//! Points calculator configuration.

use crate::error::{RecommendError, Result};

/// Parameters of the admission point formulas.
///
/// Defaults follow the Polish secondary-school admission rules.
///
/// # Examples
///
/// ```
/// use u_recommend::points::PointsConfig;
///
/// let config = PointsConfig::default()
///     .with_honors_bonus(7.0)
///     .with_min_conduct_grade(5.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PointsConfig {
    /// Weight of each core exam, in exam order (polish, math, english).
    pub exam_weights: Vec<f64>,

    /// Flat bonus for a diploma with honors.
    pub honors_bonus: f64,

    /// Minimum mean of in-range grades that earns the honors bonus.
    pub honors_gpa: f64,

    /// Lowest valid grade. Lower entries (e.g. 0 for "no grade") are
    /// ignored by the GPA.
    pub min_grade: f64,

    /// Highest valid grade.
    pub max_grade: f64,

    /// Points per grade, indexed by the integer grade.
    pub grade_points: Vec<f64>,

    /// Stricter honors policy: the conduct grade must reach this value.
    ///
    /// `None` ignores conduct.
    pub min_conduct_grade: Option<f64>,

    /// Key of the conduct grade in a grade mapping. Extracted before the
    /// GPA is computed.
    pub conduct_key: String,

    /// Lower bound of the point scale (default minimum threshold).
    pub min_points: f64,

    /// Upper bound of the point scale (default maximum threshold).
    pub max_points: f64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            exam_weights: vec![0.35, 0.35, 0.30],
            honors_bonus: 7.0,
            honors_gpa: 4.75,
            min_grade: 1.0,
            max_grade: 6.0,
            grade_points: vec![0.0, 0.0, 2.0, 8.0, 14.0, 17.0, 18.0],
            min_conduct_grade: None,
            conduct_key: "zachowanie".to_string(),
            min_points: 0.0,
            max_points: 200.0,
        }
    }
}

impl PointsConfig {
    pub fn with_exam_weights(mut self, weights: Vec<f64>) -> Self {
        self.exam_weights = weights;
        self
    }

    pub fn with_honors_bonus(mut self, bonus: f64) -> Self {
        self.honors_bonus = bonus;
        self
    }

    pub fn with_honors_gpa(mut self, gpa: f64) -> Self {
        self.honors_gpa = gpa;
        self
    }

    pub fn with_grade_points(mut self, table: Vec<f64>) -> Self {
        self.grade_points = table;
        self
    }

    pub fn with_min_conduct_grade(mut self, grade: f64) -> Self {
        self.min_conduct_grade = Some(grade);
        self
    }

    pub fn with_conduct_key(mut self, key: impl Into<String>) -> Self {
        self.conduct_key = key.into();
        self
    }

    /// Midpoint of the point scale, used as the default average threshold.
    pub fn default_avg_points(&self) -> f64 {
        (self.min_points + self.max_points) / 2.0
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.exam_weights.is_empty() {
            return Err(RecommendError::configuration("exam_weights must not be empty"));
        }
        if self.exam_weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RecommendError::configuration(
                "exam_weights must be finite and non-negative",
            ));
        }
        if self.min_grade > self.max_grade {
            return Err(RecommendError::configuration(format!(
                "min_grade {} exceeds max_grade {}",
                self.min_grade, self.max_grade
            )));
        }
        if self.grade_points.len() <= self.max_grade as usize {
            return Err(RecommendError::configuration(format!(
                "grade_points needs an entry for every grade up to {}, got {}",
                self.max_grade,
                self.grade_points.len()
            )));
        }
        if self.min_points > self.max_points {
            return Err(RecommendError::configuration(
                "min_points must not exceed max_points",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PointsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.exam_weights, vec![0.35, 0.35, 0.30]);
        assert!((config.default_avg_points() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_avg_points_is_midpoint() {
        let config = PointsConfig {
            min_points: 40.0,
            max_points: 100.0,
            ..PointsConfig::default()
        };
        assert_eq!(config.default_avg_points(), 70.0);
    }

    #[test]
    fn test_validate_short_grade_table() {
        let config = PointsConfig::default().with_grade_points(vec![0.0, 1.0]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_weight() {
        let config = PointsConfig::default().with_exam_weights(vec![0.5, -0.5]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_weights() {
        let config = PointsConfig::default().with_exam_weights(vec![]);
        assert!(config.validate().is_err());
    }
}
