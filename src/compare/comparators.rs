//! Built-in comparators.

use super::types::{Comparator, Distance};
use crate::domain::{Profile, Student};
use crate::error::{RecommendError, Result};
use crate::points::PointsCalculator;
use std::sync::Arc;

pub const SCHOOL_TYPE: &str = "school_type";
pub const EXAM_SCORES: &str = "exam_scores";
pub const SUBJECT_AFFINITY: &str = "subject_affinity";
pub const ADMISSION_POINTS: &str = "admission_points";

/// Distance between the desired and the offered school type code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchoolTypeComparator;

impl Comparator for SchoolTypeComparator {
    fn name(&self) -> &str {
        SCHOOL_TYPE
    }

    fn compare(&self, student: &Student, profile: &Profile) -> Result<Distance> {
        let desired = f64::from(student.desired_school_type());
        let offered = f64::from(profile.school_type());
        Ok((desired - offered).abs().into())
    }
}

/// Mean absolute difference between the student's exam results and the
/// profile's historical exam averages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExamScoresComparator;

impl Comparator for ExamScoresComparator {
    fn name(&self) -> &str {
        EXAM_SCORES
    }

    fn compare(&self, student: &Student, profile: &Profile) -> Result<Distance> {
        let own = student.exam_scores();
        let benchmark = profile.exam_benchmark_scores();
        if own.len() != benchmark.len() {
            return Err(RecommendError::type_conflict(
                format!("exam benchmarks of `{}`", profile.name()),
                own.len(),
                benchmark.len(),
            ));
        }
        // no exams on either side: missing data, left to the aggregator
        if own.is_empty() {
            return Ok(f64::NAN.into());
        }

        let total: f64 = own.iter().zip(benchmark).map(|(a, b)| (a - b).abs()).sum();
        Ok((total / own.len() as f64).into())
    }
}

/// Inverse affinity between liked and offered subjects.
///
/// Plain policy: `1 / (1 + liked · offered)`. With a miss penalty, each
/// liked subject the profile lacks subtracts the penalty from the affinity
/// first. A negative affinity maps to `1 - affinity`, which keeps the score
/// continuous at zero and increasing with every further miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectAffinityComparator {
    miss_penalty: Option<f64>,
}

impl SubjectAffinityComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_miss_penalty(penalty: f64) -> Self {
        Self {
            miss_penalty: Some(penalty),
        }
    }
}

impl Comparator for SubjectAffinityComparator {
    fn name(&self) -> &str {
        SUBJECT_AFFINITY
    }

    fn compare(&self, student: &Student, profile: &Profile) -> Result<Distance> {
        let liked = student.liked_subjects();
        let offered = profile.offered_subjects();
        let mut affinity = liked.dot(offered)?;

        if let Some(penalty) = self.miss_penalty {
            let misses = liked
                .iter()
                .zip(offered.iter())
                .filter(|&(&l, &o)| l > 0.0 && o <= 0.0)
                .count();
            affinity -= penalty * misses as f64;
        }

        let score = if affinity >= 0.0 {
            1.0 / (1.0 + affinity)
        } else {
            1.0 - affinity
        };
        Ok(score.into())
    }
}

/// Distance between the student's admission points and the profile's
/// historical thresholds.
///
/// Below the minimum the distance is the shortfall; otherwise it is the
/// distance to the average, scaled by the damping factor when one is set.
#[derive(Clone)]
pub struct AdmissionPointsComparator {
    calculator: Arc<dyn PointsCalculator>,
    damping: Option<f64>,
}

impl AdmissionPointsComparator {
    pub fn new(calculator: Arc<dyn PointsCalculator>) -> Self {
        Self {
            calculator,
            damping: None,
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = Some(damping);
        self
    }
}

impl std::fmt::Debug for AdmissionPointsComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionPointsComparator")
            .field("damping", &self.damping)
            .finish_non_exhaustive()
    }
}

impl Comparator for AdmissionPointsComparator {
    fn name(&self) -> &str {
        ADMISSION_POINTS
    }

    fn compare(&self, student: &Student, profile: &Profile) -> Result<Distance> {
        let points = self.calculator.points_for_profile(student, profile)?;

        if points < profile.min_points() {
            return Ok((profile.min_points() - points,).into());
        }

        let distance = (profile.avg_points() - points).abs();
        Ok((distance * self.damping.unwrap_or(1.0)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PolishPointsCalculator;
    use crate::subjects::SubjectVector;
    use crate::testing::{build_profile, build_student, profile, student};

    fn distance(c: &dyn Comparator, s: &Student, p: &Profile) -> f64 {
        c.compare(s, p).unwrap().value()
    }

    #[test]
    fn test_school_type() {
        let s = build_student(student().with_desired_school_type(0));
        let p = build_profile(profile("tech", 2));
        assert_eq!(distance(&SchoolTypeComparator, &s, &p), 2.0);
    }

    #[test]
    fn test_exam_scores_mean_abs_diff() {
        let s = build_student(student().with_exam_scores(vec![50.0, 70.0, 90.0]));
        let p = build_profile(profile("p", 0).with_exam_benchmarks(vec![60.0, 60.0, 60.0]));
        // (10 + 10 + 30) / 3
        assert!((distance(&ExamScoresComparator, &s, &p) - 50.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_exam_scores_shape_conflict() {
        let s = build_student(student());
        let p = build_profile(profile("p", 0).with_exam_benchmarks(vec![60.0, 60.0]));
        let err = ExamScoresComparator.compare(&s, &p).unwrap_err();
        assert!(matches!(err, RecommendError::TypeConflict { expected: 3, found: 2, .. }));
    }

    #[test]
    fn test_subject_affinity_plain() {
        let s = build_student(student().with_liked_subjects(vec!["math", "physics"]));
        let both = build_profile(profile("both", 0).with_offered_subjects(vec!["math", "physics"]));
        let none = build_profile(profile("none", 0).with_offered_subjects(vec!["art"]));

        let c = SubjectAffinityComparator::new();
        assert!((distance(&c, &s, &both) - 1.0 / 3.0).abs() < 1e-12);
        assert!((distance(&c, &s, &none) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_subject_affinity_penalty() {
        let s = build_student(student().with_liked_subjects(vec!["math", "physics", "art"]));
        let one = build_profile(profile("one", 0).with_offered_subjects(vec!["math"]));
        let none = build_profile(profile("none", 0));

        let c = SubjectAffinityComparator::with_miss_penalty(0.2);
        // affinity 1 - 2 * 0.2 = 0.6
        assert!((distance(&c, &s, &one) - 1.0 / 1.6).abs() < 1e-12);
        // affinity -0.6 → 1.6, worse than any non-negative affinity
        assert!((distance(&c, &s, &none) - 1.6).abs() < 1e-12);
        assert!(distance(&c, &s, &none) > distance(&c, &s, &one));
    }

    #[test]
    fn test_subject_affinity_vocabulary_conflict() {
        let s = build_student(student());
        let p = Profile::builder("other-vocab", 0)
            .with_offered_subjects(SubjectVector::from(vec![1.0]))
            .build(&crate::subjects::SubjectVocabulary::new(["x"]).unwrap())
            .unwrap();
        let err = SubjectAffinityComparator::new().compare(&s, &p).unwrap_err();
        assert!(matches!(err, RecommendError::TypeConflict { .. }));
    }

    #[test]
    fn test_admission_points_below_minimum() {
        // base 60; scored math + physics at grade 4 → 28; total 88
        let s = build_student(student());
        let p = build_profile(
            profile("hard", 0)
                .with_scored_subjects(vec!["math", "physics"])
                .with_points(100.0, 120.0, 150.0),
        );
        let c = AdmissionPointsComparator::new(Arc::new(PolishPointsCalculator::default()));
        assert!((distance(&c, &s, &p) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_admission_points_above_minimum_damped() {
        let s = build_student(student());
        let p = build_profile(
            profile("easy", 0)
                .with_scored_subjects(vec!["math", "physics"])
                .with_points(50.0, 78.0, 150.0),
        );
        let calc: Arc<dyn PointsCalculator> = Arc::new(PolishPointsCalculator::default());

        let plain = AdmissionPointsComparator::new(calc.clone());
        let damped = AdmissionPointsComparator::new(calc).with_damping(0.8);
        assert!((distance(&plain, &s, &p) - 10.0).abs() < 1e-9);
        assert!((distance(&damped, &s, &p) - 8.0).abs() < 1e-9);
    }
}
