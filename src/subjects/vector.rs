//! Dense subject vector.

use crate::error::{RecommendError, Result};

/// Weights over the subject vocabulary, one entry per subject in
/// vocabulary order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SubjectVector(Vec<f64>);

impl SubjectVector {
    /// A vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// Dot product with another vector of the same length.
    ///
    /// Vectors encoded against different vocabularies have different
    /// lengths and yield a type conflict.
    pub fn dot(&self, other: &SubjectVector) -> Result<f64> {
        if self.len() != other.len() {
            return Err(RecommendError::type_conflict(
                "subject vector",
                self.len(),
                other.len(),
            ));
        }
        Ok(self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum())
    }

    /// Applies `f` to each entry.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> SubjectVector {
        SubjectVector(self.0.iter().map(|&v| f(v)).collect())
    }

    pub(crate) fn set(&mut self, index: usize, value: f64) {
        self.0[index] = value;
    }
}

impl From<Vec<f64>> for SubjectVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<SubjectVector> for Vec<f64> {
    fn from(vector: SubjectVector) -> Self {
        vector.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot() {
        let a = SubjectVector::from(vec![1.0, 0.0, 2.0]);
        let b = SubjectVector::from(vec![3.0, 5.0, 0.5]);
        assert!((a.dot(&b).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_dot_length_mismatch() {
        let a = SubjectVector::zeros(3);
        let b = SubjectVector::zeros(4);
        assert!(matches!(
            a.dot(&b),
            Err(RecommendError::TypeConflict { expected: 3, found: 4, .. })
        ));
    }

    #[test]
    fn test_map() {
        let a = SubjectVector::from(vec![1.0, 2.0]);
        assert_eq!(a.map(|v| v * 10.0).as_slice(), &[10.0, 20.0]);
    }
}
