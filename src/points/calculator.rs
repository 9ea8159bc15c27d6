//! Points calculator capability and its Polish implementation.

use super::config::PointsConfig;
use super::grades::Grades;
use crate::domain::{Profile, Student};
use crate::error::{RecommendError, Result};
use crate::subjects::SubjectVector;

/// Computes admission points.
///
/// The student-side parts ([`base_points`](PointsCalculator::base_points)
/// and [`subject_points`](PointsCalculator::subject_points)) run once when a
/// [`Student`] is built; the profile-dependent sum runs per comparison.
///
/// # Implementing
///
/// ```ignore
/// struct FlatCalculator;
///
/// impl PointsCalculator for FlatCalculator {
///     fn base_points(&self, exams: &[f64], _: &Grades, extra: f64) -> Result<f64> {
///         Ok(exams.iter().sum::<f64>() + extra)
///     }
///     fn subject_points(&self, grades: &Grades) -> SubjectVector {
///         grades.vector().clone()
///     }
/// }
/// ```
pub trait PointsCalculator: Send + Sync {
    /// Profile-independent points: exams, bonuses, additional points.
    fn base_points(&self, exam_scores: &[f64], grades: &Grades, additional_points: f64)
        -> Result<f64>;

    /// Per-subject points derived from the grades, in vocabulary order.
    fn subject_points(&self, grades: &Grades) -> SubjectVector;

    /// Mapping key of the conduct grade, if this calculator uses one.
    fn conduct_key(&self) -> Option<&str> {
        None
    }

    /// Total points of `student` for `profile`.
    fn points_for_profile(&self, student: &Student, profile: &Profile) -> Result<f64> {
        let subject_part = profile.scored_subjects().dot(student.subject_points())?;
        Ok(student.base_points() + subject_part)
    }
}

/// Polish secondary-school admission points.
///
/// - Base: `0.35·polish + 0.35·math + 0.30·english`, plus 7 for a diploma
///   with honors (GPA ≥ 4.75, optionally gated on conduct), plus additional
///   points.
/// - Per subject: grade looked up in `[0, 0, 2, 8, 14, 17, 18]`.
#[derive(Debug, Clone, Default)]
pub struct PolishPointsCalculator {
    config: PointsConfig,
}

impl PolishPointsCalculator {
    /// Creates a calculator, validating the configuration.
    pub fn new(config: PointsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PointsConfig {
        &self.config
    }

    /// Grade → points lookup. Grades outside the table score nothing.
    pub fn grade_points(&self, grade: f64) -> f64 {
        if !grade.is_finite() || grade < 0.0 {
            return 0.0;
        }
        self.config
            .grade_points
            .get(grade.floor() as usize)
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether `grades` earn the honors bonus.
    pub fn has_honors(&self, grades: &Grades) -> bool {
        let gpa_ok = grades
            .gpa(self.config.min_grade, self.config.max_grade)
            .is_some_and(|gpa| gpa >= self.config.honors_gpa);

        let conduct_ok = match self.config.min_conduct_grade {
            None => true,
            Some(min) => grades.conduct().is_some_and(|c| c >= min),
        };

        gpa_ok && conduct_ok
    }
}

impl PointsCalculator for PolishPointsCalculator {
    fn base_points(
        &self,
        exam_scores: &[f64],
        grades: &Grades,
        additional_points: f64,
    ) -> Result<f64> {
        let weights = &self.config.exam_weights;
        if exam_scores.len() != weights.len() {
            return Err(RecommendError::type_conflict(
                "exam scores",
                weights.len(),
                exam_scores.len(),
            ));
        }

        let mut points: f64 = exam_scores.iter().zip(weights).map(|(s, w)| s * w).sum();
        if self.has_honors(grades) {
            points += self.config.honors_bonus;
        }
        Ok(points + additional_points)
    }

    fn subject_points(&self, grades: &Grades) -> SubjectVector {
        grades.vector().map(|g| self.grade_points(g))
    }

    fn conduct_key(&self) -> Option<&str> {
        Some(&self.config.conduct_key)
    }
}
