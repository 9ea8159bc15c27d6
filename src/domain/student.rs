//! Student: the applicant profiles are matched against.

use crate::error::{RecommendError, Result};
use crate::points::{Grades, GradesInput, PointsCalculator};
use crate::subjects::{SubjectInput, SubjectVector, SubjectVocabulary};
use std::collections::BTreeMap;

/// Core exams in the order exam vectors use.
pub const CORE_EXAMS: [&str; 3] = ["polish", "math", "english"];

/// One applicant.
///
/// `base_points` and `subject_points` are derived from the grades and exam
/// results at build time. A student has no setters, so the cached values
/// cannot go stale; build a new student to change any input.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    exam_scores: Vec<f64>,
    grades: Grades,
    liked_subjects: SubjectVector,
    desired_school_type: u8,
    additional_points: f64,
    attribute_preferences: BTreeMap<String, f64>,
    base_points: f64,
    subject_points: SubjectVector,
}

impl Student {
    pub fn builder() -> StudentBuilder {
        StudentBuilder::default()
    }

    /// Exam results in core exam order.
    pub fn exam_scores(&self) -> &[f64] {
        &self.exam_scores
    }

    pub fn grades(&self) -> &Grades {
        &self.grades
    }

    pub fn liked_subjects(&self) -> &SubjectVector {
        &self.liked_subjects
    }

    pub fn desired_school_type(&self) -> u8 {
        self.desired_school_type
    }

    pub fn additional_points(&self) -> f64 {
        self.additional_points
    }

    /// Relative weight the student gives `attribute`; 1 when unspecified.
    pub fn attribute_preference(&self, attribute: &str) -> f64 {
        self.attribute_preferences
            .get(attribute)
            .copied()
            .unwrap_or(1.0)
    }

    pub fn attribute_preferences(&self) -> &BTreeMap<String, f64> {
        &self.attribute_preferences
    }

    /// Points that do not depend on the profile.
    pub fn base_points(&self) -> f64 {
        self.base_points
    }

    /// Grade points per subject, in vocabulary order.
    pub fn subject_points(&self) -> &SubjectVector {
        &self.subject_points
    }
}

#[derive(Debug, Clone)]
enum ExamInput {
    Ordered(Vec<f64>),
    Named(Vec<(String, f64)>),
}

/// Builder for [`Student`].
///
/// # Examples
///
/// ```
/// use u_recommend::domain::Student;
/// use u_recommend::points::PolishPointsCalculator;
/// use u_recommend::subjects::SubjectVocabulary;
///
/// let vocab = SubjectVocabulary::polish();
/// let student = Student::builder()
///     .with_named_exam_scores(vec![("polish", 78.0), ("math", 100.0), ("english", 98.0)])
///     .with_grades(vec![("matematyka", 5.0), ("fizyka", 6.0)])
///     .with_liked_subjects(vec!["matematyka", "informatyka"])
///     .with_desired_school_type(0)
///     .with_additional_points(3.0)
///     .build(&vocab, &PolishPointsCalculator::default())
///     .unwrap();
/// assert!(student.base_points() > 90.0);
/// ```
#[derive(Debug, Clone)]
pub struct StudentBuilder {
    exams: ExamInput,
    grades: GradesInput,
    liked_subjects: SubjectInput,
    desired_school_type: u8,
    additional_points: f64,
    attribute_preferences: BTreeMap<String, f64>,
}

impl Default for StudentBuilder {
    fn default() -> Self {
        Self {
            exams: ExamInput::Ordered(Vec::new()),
            grades: GradesInput::Map(Vec::new()),
            liked_subjects: SubjectInput::Names(Vec::new()),
            desired_school_type: 1,
            additional_points: 0.0,
            attribute_preferences: BTreeMap::new(),
        }
    }
}

impl StudentBuilder {
    /// Exam results already in core exam order.
    pub fn with_exam_scores(mut self, scores: Vec<f64>) -> Self {
        self.exams = ExamInput::Ordered(scores);
        self
    }

    /// Exam results keyed by exam name (`polish`, `math`, `english`).
    pub fn with_named_exam_scores<S: Into<String>>(mut self, scores: Vec<(S, f64)>) -> Self {
        self.exams = ExamInput::Named(scores.into_iter().map(|(n, s)| (n.into(), s)).collect());
        self
    }

    pub fn with_grades(mut self, grades: impl Into<GradesInput>) -> Self {
        self.grades = grades.into();
        self
    }

    pub fn with_liked_subjects(mut self, subjects: impl Into<SubjectInput>) -> Self {
        self.liked_subjects = subjects.into();
        self
    }

    pub fn with_desired_school_type(mut self, code: u8) -> Self {
        self.desired_school_type = code;
        self
    }

    pub fn with_additional_points(mut self, points: f64) -> Self {
        self.additional_points = points;
        self
    }

    /// Multiplies the weight of `attribute` for this student only.
    pub fn with_attribute_preference(mut self, attribute: impl Into<String>, weight: f64) -> Self {
        self.attribute_preferences.insert(attribute.into(), weight);
        self
    }

    /// Encodes subject data and computes the cached point components.
    pub fn build(
        self,
        vocabulary: &SubjectVocabulary,
        calculator: &dyn PointsCalculator,
    ) -> Result<Student> {
        if let Some((name, weight)) = self
            .attribute_preferences
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(RecommendError::configuration(format!(
                "preference for `{name}` must be finite and non-negative, got {weight}"
            )));
        }

        let exam_scores = match self.exams {
            ExamInput::Ordered(scores) => scores,
            ExamInput::Named(named) => order_exams(&named)?,
        };
        let grades = Grades::resolve(self.grades, vocabulary, calculator.conduct_key())?;
        let liked_subjects = vocabulary.encode(self.liked_subjects)?;

        let base_points = calculator.base_points(&exam_scores, &grades, self.additional_points)?;
        let subject_points = calculator.subject_points(&grades);

        Ok(Student {
            exam_scores,
            grades,
            liked_subjects,
            desired_school_type: self.desired_school_type,
            additional_points: self.additional_points,
            attribute_preferences: self.attribute_preferences,
            base_points,
            subject_points,
        })
    }
}

fn order_exams(named: &[(String, f64)]) -> Result<Vec<f64>> {
    CORE_EXAMS
        .iter()
        .map(|exam| {
            named
                .iter()
                .find(|(name, _)| name.trim().eq_ignore_ascii_case(exam))
                .map(|(_, score)| *score)
                .ok_or_else(|| {
                    RecommendError::configuration(format!("missing exam result: {exam}"))
                })
        })
        .collect()
}
