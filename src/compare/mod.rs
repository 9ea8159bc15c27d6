//! Attribute comparators.
//!
//! A comparator scores one (student, profile) pair on one attribute and
//! returns a distance: **lower is a better match**. Comparators are looked
//! up by attribute name in an explicit [`ComparatorRegistry`] built at
//! startup; nothing is discovered at runtime.
//!
//! # Built-in attributes
//!
//! | name               | distance                                          |
//! |--------------------|---------------------------------------------------|
//! | `school_type`      | absolute difference of the type codes             |
//! | `exam_scores`      | mean absolute difference to the exam benchmarks   |
//! | `subject_affinity` | `1 / (1 + liked · offered)`                       |
//! | `admission_points` | gap below the minimum, else distance to average   |

mod comparators;
mod policy;
mod registry;
mod types;

pub use comparators::{
    AdmissionPointsComparator, ExamScoresComparator, SchoolTypeComparator,
    SubjectAffinityComparator, ADMISSION_POINTS, EXAM_SCORES, SCHOOL_TYPE, SUBJECT_AFFINITY,
};
pub use policy::ComparatorPolicy;
pub use registry::ComparatorRegistry;
pub use types::{Comparator, Distance};
