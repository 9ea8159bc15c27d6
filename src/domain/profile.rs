//! School profile: one program of one school, the unit being ranked.

use crate::error::Result;
use crate::points::PointsConfig;
use crate::subjects::{SubjectInput, SubjectVector, SubjectVocabulary};

/// One school program.
///
/// Built once at load time through [`ProfileBuilder`] and never mutated;
/// subject vectors are encoded against the vocabulary passed to
/// [`ProfileBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Profile {
    name: String,
    school: String,
    address: String,
    school_type: u8,
    exam_benchmark_scores: Vec<f64>,
    offered_subject_names: Vec<String>,
    offered_subjects: SubjectVector,
    scored_subjects: SubjectVector,
    min_points: f64,
    avg_points: f64,
    max_points: f64,
}

impl Profile {
    /// Starts a profile with the given name and school type code.
    pub fn builder(name: impl Into<String>, school_type: u8) -> ProfileBuilder {
        ProfileBuilder::new(name, school_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn school(&self) -> &str {
        &self.school
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn school_type(&self) -> u8 {
        self.school_type
    }

    /// Historical exam averages, in core exam order.
    pub fn exam_benchmark_scores(&self) -> &[f64] {
        &self.exam_benchmark_scores
    }

    /// Emphasized subjects as they appeared in the source data.
    pub fn offered_subject_names(&self) -> &[String] {
        &self.offered_subject_names
    }

    pub fn offered_subjects(&self) -> &SubjectVector {
        &self.offered_subjects
    }

    pub fn scored_subjects(&self) -> &SubjectVector {
        &self.scored_subjects
    }

    pub fn min_points(&self) -> f64 {
        self.min_points
    }

    pub fn avg_points(&self) -> f64 {
        self.avg_points
    }

    pub fn max_points(&self) -> f64 {
        self.max_points
    }
}

/// Builder for [`Profile`].
///
/// # Examples
///
/// ```
/// use u_recommend::domain::Profile;
/// use u_recommend::subjects::SubjectVocabulary;
///
/// let vocab = SubjectVocabulary::new(["math", "physics"]).unwrap();
/// let profile = Profile::builder("mat-fiz", 0)
///     .with_school("XIV LO")
///     .with_exam_benchmarks(vec![70.0, 80.0, 75.0])
///     .with_offered_subjects(vec!["math", "physics"])
///     .with_scored_subjects(vec!["math"])
///     .with_points(120.0, 150.0, 190.0)
///     .build(&vocab)
///     .unwrap();
/// assert_eq!(profile.offered_subjects().as_slice(), &[1.0, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    name: String,
    school: String,
    address: String,
    school_type: u8,
    exam_benchmark_scores: Vec<f64>,
    offered_subjects: SubjectInput,
    scored_subjects: SubjectInput,
    min_points: f64,
    avg_points: f64,
    max_points: f64,
}

impl ProfileBuilder {
    pub fn new(name: impl Into<String>, school_type: u8) -> Self {
        let scale = PointsConfig::default();
        Self {
            name: name.into(),
            school: String::new(),
            address: String::new(),
            school_type,
            exam_benchmark_scores: Vec::new(),
            offered_subjects: SubjectInput::Names(Vec::new()),
            scored_subjects: SubjectInput::Names(Vec::new()),
            min_points: scale.min_points,
            avg_points: scale.default_avg_points(),
            max_points: scale.max_points,
        }
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = school.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_exam_benchmarks(mut self, scores: Vec<f64>) -> Self {
        self.exam_benchmark_scores = scores;
        self
    }

    pub fn with_offered_subjects(mut self, subjects: impl Into<SubjectInput>) -> Self {
        self.offered_subjects = subjects.into();
        self
    }

    pub fn with_scored_subjects(mut self, subjects: impl Into<SubjectInput>) -> Self {
        self.scored_subjects = subjects.into();
        self
    }

    /// Sets the minimum, average and maximum admission points.
    pub fn with_points(mut self, min: f64, avg: f64, max: f64) -> Self {
        self.min_points = min;
        self.avg_points = avg;
        self.max_points = max;
        self
    }

    /// Encodes the subject data against `vocabulary`.
    pub fn build(self, vocabulary: &SubjectVocabulary) -> Result<Profile> {
        let offered_subject_names = match &self.offered_subjects {
            SubjectInput::Names(names) => names.clone(),
            SubjectInput::Weighted(pairs) => pairs.iter().map(|(n, _)| n.clone()).collect(),
            SubjectInput::Encoded(vector) => vocabulary
                .names()
                .iter()
                .zip(vector.iter())
                .filter(|&(_, &w)| w != 0.0)
                .map(|(n, _)| n.clone())
                .collect(),
        };

        Ok(Profile {
            offered_subjects: vocabulary.encode(self.offered_subjects)?,
            scored_subjects: vocabulary.encode(self.scored_subjects)?,
            name: self.name,
            school: self.school,
            address: self.address,
            school_type: self.school_type,
            exam_benchmark_scores: self.exam_benchmark_scores,
            offered_subject_names,
            min_points: self.min_points,
            avg_points: self.avg_points,
            max_points: self.max_points,
        })
    }
}
