//! Student grades.

use crate::error::Result;
use crate::subjects::{normalize_name, SubjectInput, SubjectVector, SubjectVocabulary};
use std::collections::{BTreeMap, HashMap};

/// Grades as callers supply them.
#[derive(Debug, Clone, PartialEq)]
pub enum GradesInput {
    /// Subject → grade. May contain a conduct entry.
    Map(Vec<(String, f64)>),
    /// Grades already in vocabulary order, plus an optional conduct grade.
    Encoded {
        grades: SubjectVector,
        conduct: Option<f64>,
    },
}

/// Grades resolved against a vocabulary, with conduct split out.
#[derive(Debug, Clone, PartialEq)]
pub struct Grades {
    vector: SubjectVector,
    conduct: Option<f64>,
}

impl Grades {
    /// Resolves `input` against `vocabulary`.
    ///
    /// A mapping entry whose name matches `conduct_key` becomes the conduct
    /// grade and never reaches the subject vector.
    pub fn resolve(
        input: GradesInput,
        vocabulary: &SubjectVocabulary,
        conduct_key: Option<&str>,
    ) -> Result<Self> {
        match input {
            GradesInput::Encoded { grades, conduct } => Ok(Self {
                vector: vocabulary.encode(grades)?,
                conduct,
            }),
            GradesInput::Map(entries) => {
                let conduct_key = conduct_key.map(normalize_name);
                let (conduct, subjects): (Vec<_>, Vec<_>) =
                    entries.into_iter().partition(|(name, _)| {
                        conduct_key.as_deref() == Some(normalize_name(name).as_str())
                    });
                Ok(Self {
                    vector: vocabulary.encode(SubjectInput::Weighted(subjects))?,
                    conduct: conduct.last().map(|(_, grade)| *grade),
                })
            }
        }
    }

    /// Grades in vocabulary order; 0 marks a subject without a grade.
    pub fn vector(&self) -> &SubjectVector {
        &self.vector
    }

    pub fn conduct(&self) -> Option<f64> {
        self.conduct
    }

    /// Mean of the grades within `[min_grade, max_grade]`.
    ///
    /// `None` when no grade is in range.
    pub fn gpa(&self, min_grade: f64, max_grade: f64) -> Option<f64> {
        let (sum, count) = self
            .vector
            .iter()
            .filter(|&&g| g >= min_grade && g <= max_grade)
            .fold((0.0, 0usize), |(s, c), &g| (s + g, c + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

impl From<Vec<(String, f64)>> for GradesInput {
    fn from(entries: Vec<(String, f64)>) -> Self {
        GradesInput::Map(entries)
    }
}

impl From<Vec<(&str, f64)>> for GradesInput {
    fn from(entries: Vec<(&str, f64)>) -> Self {
        GradesInput::Map(entries.into_iter().map(|(n, g)| (n.to_string(), g)).collect())
    }
}

impl From<BTreeMap<String, f64>> for GradesInput {
    fn from(map: BTreeMap<String, f64>) -> Self {
        GradesInput::Map(map.into_iter().collect())
    }
}

impl From<HashMap<String, f64>> for GradesInput {
    fn from(map: HashMap<String, f64>) -> Self {
        GradesInput::Map(map.into_iter().collect())
    }
}

impl From<SubjectVector> for GradesInput {
    fn from(grades: SubjectVector) -> Self {
        GradesInput::Encoded {
            grades,
            conduct: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> SubjectVocabulary {
        SubjectVocabulary::new(["math", "physics", "art"]).unwrap()
    }

    #[test]
    fn test_conduct_extracted_from_mapping() {
        let grades = Grades::resolve(
            vec![("math", 6.0), ("Zachowanie", 5.0), ("art", 4.0)].into(),
            &vocab(),
            Some("zachowanie"),
        )
        .unwrap();
        assert_eq!(grades.vector().as_slice(), &[6.0, 0.0, 4.0]);
        assert_eq!(grades.conduct(), Some(5.0));
    }

    #[test]
    fn test_gpa_ignores_missing_grades() {
        let grades = Grades::resolve(
            vec![("math", 6.0), ("art", 4.0)].into(),
            &vocab(),
            Some("zachowanie"),
        )
        .unwrap();
        // physics is 0 (no grade) and stays out of the mean
        assert!((grades.gpa(1.0, 6.0).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_gpa_empty() {
        let grades =
            Grades::resolve(SubjectVector::zeros(3).into(), &vocab(), Some("zachowanie")).unwrap();
        assert_eq!(grades.gpa(1.0, 6.0), None);
        assert_eq!(grades.conduct(), None);
    }

    #[test]
    fn test_encoded_grades() {
        let input = GradesInput::Encoded {
            grades: SubjectVector::from(vec![5.0, 5.0, 5.0]),
            conduct: Some(6.0),
        };
        let grades = Grades::resolve(input, &vocab(), Some("zachowanie")).unwrap();
        assert_eq!(grades.conduct(), Some(6.0));
        assert!((grades.gpa(1.0, 6.0).unwrap() - 5.0).abs() < 1e-12);
    }
}
