//! Fixtures shared by unit tests.

use crate::domain::{Profile, ProfileBuilder, Student, StudentBuilder};
use crate::points::PolishPointsCalculator;
use crate::subjects::SubjectVocabulary;

pub(crate) fn vocab() -> SubjectVocabulary {
    SubjectVocabulary::new(["polish", "math", "english", "physics", "art"]).unwrap()
}

/// Student with average exams, no honors, wanting a liceum (code 0).
pub(crate) fn student() -> StudentBuilder {
    Student::builder()
        .with_exam_scores(vec![60.0, 60.0, 60.0])
        .with_grades(vec![("math", 4.0), ("physics", 4.0)])
        .with_liked_subjects(vec!["math", "physics"])
        .with_desired_school_type(0)
}

pub(crate) fn build_student(builder: StudentBuilder) -> Student {
    builder
        .build(&vocab(), &PolishPointsCalculator::default())
        .unwrap()
}

pub(crate) fn profile(name: &str, school_type: u8) -> ProfileBuilder {
    Profile::builder(name, school_type).with_exam_benchmarks(vec![60.0, 60.0, 60.0])
}

pub(crate) fn build_profile(builder: ProfileBuilder) -> Profile {
    builder.build(&vocab()).unwrap()
}

/// Profiles differing only in school type, in the given order.
pub(crate) fn typed_profiles(types: &[u8]) -> Vec<Profile> {
    types
        .iter()
        .enumerate()
        .map(|(i, &t)| build_profile(profile(&format!("p{i}"), t)))
        .collect()
}
