//! Admission points.
//!
//! A student's admission points split into a profile-independent base
//! (weighted exams, honors bonus, additional points) and a profile-dependent
//! part: the grade points of the subjects the profile scores.
//!
//! The Polish point formulas live behind the [`PointsCalculator`] trait so
//! another education system can replace them wholesale.
//!
//! # Key Types
//!
//! - [`PointsConfig`]: Exam weights, honors rule, grade-point table
//! - [`PointsCalculator`]: The replaceable capability
//! - [`PolishPointsCalculator`]: Default implementation
//! - [`Grades`] / [`GradesInput`]: Grades as a mapping or a pre-built vector

mod calculator;
mod config;
mod grades;

pub use calculator::{PointsCalculator, PolishPointsCalculator};
pub use config::PointsConfig;
pub use grades::{Grades, GradesInput};
