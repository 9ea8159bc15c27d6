//! Sparse subject input → dense [`SubjectVector`].

use super::vector::SubjectVector;
use super::vocabulary::SubjectVocabulary;
use crate::error::{RecommendError, Result};
use std::collections::{BTreeMap, HashMap};

/// Subject data as callers supply it.
#[derive(Debug, Clone, PartialEq)]
pub enum SubjectInput {
    /// Subject names, each with weight 1.
    Names(Vec<String>),
    /// Subject names with explicit weights.
    Weighted(Vec<(String, f64)>),
    /// A vector already in vocabulary order. Passed through unchanged.
    Encoded(SubjectVector),
}

impl SubjectVocabulary {
    /// Encodes sparse subject data into a vector in vocabulary order.
    ///
    /// Unknown names are dropped: input data carries name variants and
    /// encoding artifacts, so a miss is not an error. Pre-encoded input
    /// must already have the vocabulary's length.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_recommend::subjects::SubjectVocabulary;
    ///
    /// let vocab = SubjectVocabulary::new(["math", "physics", "art"]).unwrap();
    /// let v = vocab.encode(vec!["physics", "unknown"]).unwrap();
    /// assert_eq!(v.as_slice(), &[0.0, 1.0, 0.0]);
    ///
    /// // idempotent on encoded input
    /// assert_eq!(vocab.encode(v.clone()).unwrap(), v);
    /// ```
    pub fn encode(&self, input: impl Into<SubjectInput>) -> Result<SubjectVector> {
        match input.into() {
            SubjectInput::Encoded(vector) => {
                if vector.len() != self.len() {
                    return Err(RecommendError::type_conflict(
                        "encoded subject vector",
                        self.len(),
                        vector.len(),
                    ));
                }
                Ok(vector)
            }
            SubjectInput::Names(names) => {
                Ok(self.fill(names.iter().map(|name| (name.as_str(), 1.0))))
            }
            SubjectInput::Weighted(pairs) => {
                Ok(self.fill(pairs.iter().map(|(name, w)| (name.as_str(), *w))))
            }
        }
    }

    fn fill<'a>(&self, entries: impl Iterator<Item = (&'a str, f64)>) -> SubjectVector {
        let mut vector = SubjectVector::zeros(self.len());
        for (name, weight) in entries {
            match self.index_of(name) {
                Some(i) => vector.set(i, weight),
                None => tracing::debug!(subject = name, "dropping subject not in vocabulary"),
            }
        }
        vector
    }
}

impl From<Vec<String>> for SubjectInput {
    fn from(names: Vec<String>) -> Self {
        SubjectInput::Names(names)
    }
}

impl From<Vec<&str>> for SubjectInput {
    fn from(names: Vec<&str>) -> Self {
        SubjectInput::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for SubjectInput {
    fn from(names: &[&str]) -> Self {
        SubjectInput::Names(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<(String, f64)>> for SubjectInput {
    fn from(pairs: Vec<(String, f64)>) -> Self {
        SubjectInput::Weighted(pairs)
    }
}

impl From<Vec<(&str, f64)>> for SubjectInput {
    fn from(pairs: Vec<(&str, f64)>) -> Self {
        SubjectInput::Weighted(pairs.into_iter().map(|(n, w)| (n.to_string(), w)).collect())
    }
}

impl From<BTreeMap<String, f64>> for SubjectInput {
    fn from(map: BTreeMap<String, f64>) -> Self {
        SubjectInput::Weighted(map.into_iter().collect())
    }
}

impl From<HashMap<String, f64>> for SubjectInput {
    fn from(map: HashMap<String, f64>) -> Self {
        SubjectInput::Weighted(map.into_iter().collect())
    }
}

impl From<SubjectVector> for SubjectInput {
    fn from(vector: SubjectVector) -> Self {
        SubjectInput::Encoded(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> SubjectVocabulary {
        SubjectVocabulary::new(["math", "physics", "art", "history"]).unwrap()
    }

    #[test]
    fn test_names_weight_one() {
        let v = vocab().encode(vec!["math", "art"]).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_weighted_mapping() {
        let v = vocab()
            .encode(vec![("history", 0.5), ("physics", 2.0)])
            .unwrap();
        assert_eq!(v.as_slice(), &[0.0, 2.0, 0.0, 0.5]);
    }

    #[test]
    fn test_unknown_names_dropped() {
        let v = vocab().encode(vec!["Technik programista", "math"]).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_tab_artifacts_matched() {
        let v = vocab().encode(vec!["\tphysics", "art\t"]).unwrap();
        assert_eq!(v.as_slice(), &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_encoded_passthrough() {
        let original = SubjectVector::from(vec![0.3, 0.0, 0.0, 7.0]);
        let v = vocab().encode(original.clone()).unwrap();
        assert_eq!(v, original);
    }

    #[test]
    fn test_encoded_wrong_length() {
        let err = vocab().encode(SubjectVector::zeros(2)).unwrap_err();
        assert!(matches!(err, RecommendError::TypeConflict { .. }));
    }

    #[test]
    fn test_empty_input() {
        let v = vocab().encode(Vec::<String>::new()).unwrap();
        assert_eq!(v, SubjectVector::zeros(4));
    }
}
