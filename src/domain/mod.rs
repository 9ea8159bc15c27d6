//! Entities being matched: school profiles and students.

mod profile;
mod school_type;
mod student;

pub use profile::{Profile, ProfileBuilder};
pub use school_type::SchoolType;
pub use student::{Student, StudentBuilder, CORE_EXAMS};
