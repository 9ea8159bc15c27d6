//! Name → comparator registry.

use super::comparators::{
    AdmissionPointsComparator, ExamScoresComparator, SchoolTypeComparator,
    SubjectAffinityComparator,
};
use super::policy::ComparatorPolicy;
use super::types::Comparator;
use crate::domain::{Profile, Student};
use crate::error::{RecommendError, Result};
use crate::points::{PointsCalculator, PolishPointsCalculator};
use std::borrow::Borrow;
use std::sync::Arc;

/// Explicit mapping from attribute name to comparator.
///
/// Registration order is kept; it is the attribute order of default
/// (uniform) weights.
///
/// # Examples
///
/// ```
/// use u_recommend::compare::{ComparatorPolicy, ComparatorRegistry};
///
/// let registry = ComparatorRegistry::standard_with_policy(ComparatorPolicy::default()).unwrap();
/// assert_eq!(
///     registry.names(),
///     vec!["school_type", "exam_scores", "subject_affinity", "admission_points"]
/// );
/// assert!(registry.get("distance").is_err());
/// ```
pub struct ComparatorRegistry {
    comparators: Vec<Box<dyn Comparator>>,
}

impl ComparatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            comparators: Vec::new(),
        }
    }

    /// The four built-in comparators with default policy and the Polish
    /// points calculator.
    pub fn standard() -> Self {
        Self::new()
            .with_comparator(SchoolTypeComparator)
            .with_comparator(ExamScoresComparator)
            .with_comparator(SubjectAffinityComparator::new())
            .with_comparator(AdmissionPointsComparator::new(Arc::new(
                PolishPointsCalculator::default(),
            )))
    }

    /// The built-in comparators configured by `policy`, Polish points.
    pub fn standard_with_policy(policy: ComparatorPolicy) -> Result<Self> {
        Self::standard_with(policy, Arc::new(PolishPointsCalculator::default()))
    }

    /// The built-in comparators configured by `policy`, with `calculator`
    /// behind `admission_points`.
    pub fn standard_with(
        policy: ComparatorPolicy,
        calculator: Arc<dyn PointsCalculator>,
    ) -> Result<Self> {
        policy.validate()?;

        let affinity = match policy.affinity_miss_penalty {
            Some(penalty) => SubjectAffinityComparator::with_miss_penalty(penalty),
            None => SubjectAffinityComparator::new(),
        };
        let mut points = AdmissionPointsComparator::new(calculator);
        if let Some(damping) = policy.points_damping {
            points = points.with_damping(damping);
        }

        Ok(Self::new()
            .with_comparator(SchoolTypeComparator)
            .with_comparator(ExamScoresComparator)
            .with_comparator(affinity)
            .with_comparator(points))
    }

    /// Adds a comparator, replacing any registered under the same name.
    pub fn with_comparator<C: Comparator + 'static>(mut self, comparator: C) -> Self {
        self.register(comparator);
        self
    }

    /// Adds a comparator, replacing any registered under the same name.
    ///
    /// A replacement keeps the original registration position.
    pub fn register<C: Comparator + 'static>(&mut self, comparator: C) {
        let boxed: Box<dyn Comparator> = Box::new(comparator);
        match self
            .comparators
            .iter()
            .position(|c| c.name() == boxed.name())
        {
            Some(i) => self.comparators[i] = boxed,
            None => self.comparators.push(boxed),
        }
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Registered attribute names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.comparators.iter().map(|c| c.name()).collect()
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.comparators.iter().any(|c| c.name() == attribute)
    }

    /// Looks up the comparator for `attribute`.
    pub fn get(&self, attribute: &str) -> Result<&dyn Comparator> {
        self.comparators
            .iter()
            .find(|c| c.name() == attribute)
            .map(|c| c.as_ref())
            .ok_or_else(|| self.unknown(attribute))
    }

    /// Compares `student` and `profile` on `attribute`.
    pub fn compare(&self, student: &Student, profile: &Profile, attribute: &str) -> Result<f64> {
        Ok(self.get(attribute)?.compare(student, profile)?.value())
    }

    /// Raw distances of every profile on `attribute`, in table order.
    pub fn column(&self, attribute: &str, student: &Student, profiles: &[Profile]) -> Result<Vec<f64>> {
        self.column_of(attribute, student, profiles)
    }

    /// [`column`](Self::column) over owned or borrowed rows.
    pub(crate) fn column_of<P: Borrow<Profile>>(
        &self,
        attribute: &str,
        student: &Student,
        profiles: &[P],
    ) -> Result<Vec<f64>> {
        let comparator = self.get(attribute)?;
        profiles
            .iter()
            .map(|p| comparator.compare(student, p.borrow()).map(|d| d.value()))
            .collect()
    }

    pub(crate) fn unknown(&self, attribute: &str) -> RecommendError {
        RecommendError::UnknownAttribute {
            name: attribute.to_string(),
            available: self.names().into_iter().map(str::to_string).collect(),
        }
    }
}

impl Default for ComparatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparatorRegistry")
            .field("attributes", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{Distance, SCHOOL_TYPE};
    use crate::testing::{build_student, student, typed_profiles};

    struct Constant(&'static str, f64);

    impl Comparator for Constant {
        fn name(&self) -> &str {
            self.0
        }
        fn compare(&self, _: &Student, _: &Profile) -> Result<Distance> {
            Ok((self.1,).into())
        }
    }

    #[test]
    fn test_standard_names() {
        let registry = ComparatorRegistry::standard();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains(SCHOOL_TYPE));
    }

    #[test]
    fn test_unknown_attribute() {
        let registry = ComparatorRegistry::standard();
        let err = registry.get("commute_time").err().unwrap();
        match err {
            RecommendError::UnknownAttribute { name, available } => {
                assert_eq!(name, "commute_time");
                assert_eq!(available.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_comparator_unwraps_tuple() {
        let registry = ComparatorRegistry::new().with_comparator(Constant("flat", 4.0));
        let s = build_student(student());
        let profiles = typed_profiles(&[0]);
        assert_eq!(registry.compare(&s, &profiles[0], "flat").unwrap(), 4.0);
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = ComparatorRegistry::new()
            .with_comparator(Constant("a", 1.0))
            .with_comparator(Constant("b", 2.0));
        registry.register(Constant("a", 9.0));

        assert_eq!(registry.names(), vec!["a", "b"]);
        let s = build_student(student());
        let profiles = typed_profiles(&[0]);
        assert_eq!(registry.compare(&s, &profiles[0], "a").unwrap(), 9.0);
    }

    #[test]
    fn test_column() {
        let registry = ComparatorRegistry::standard();
        let s = build_student(student().with_desired_school_type(1));
        let profiles = typed_profiles(&[0, 1, 2, 1]);
        let column = registry.column(SCHOOL_TYPE, &s, &profiles).unwrap();
        assert_eq!(column, vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let policy = ComparatorPolicy::default().with_points_damping(-1.0);
        assert!(ComparatorRegistry::standard_with_policy(policy).is_err());
    }
}
