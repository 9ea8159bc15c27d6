//! Core trait for attribute comparators.

use crate::domain::{Profile, Student};
use crate::error::Result;

/// Scalar distance returned by a comparator. Lower is better.
///
/// Converts from a bare `f64` or from a single-element tuple `(f64,)`, the
/// legacy convention some comparators still return; both unwrap to the
/// same value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Distance(value)
    }
}

impl From<(f64,)> for Distance {
    fn from(wrapped: (f64,)) -> Self {
        Distance(wrapped.0)
    }
}

impl From<Distance> for f64 {
    fn from(distance: Distance) -> Self {
        distance.0
    }
}

/// Scores a student against a profile on one attribute.
///
/// # Examples
///
/// ```ignore
/// struct SameSchoolType;
///
/// impl Comparator for SameSchoolType {
///     fn name(&self) -> &str { "same_type" }
///     fn compare(&self, student: &Student, profile: &Profile) -> Result<Distance> {
///         let differs = student.desired_school_type() != profile.school_type();
///         Ok(if differs { 1.0 } else { 0.0 }.into())
///     }
/// }
/// ```
pub trait Comparator: Send + Sync {
    /// Attribute name this comparator is registered under.
    fn name(&self) -> &str;

    /// Distance between `student` and `profile` on this attribute.
    ///
    /// May be NaN when the underlying data is missing; aggregators decide
    /// how to treat it.
    fn compare(&self, student: &Student, profile: &Profile) -> Result<Distance>;
}
