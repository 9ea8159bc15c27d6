//! Loading profile tables from JSON and CSV.
//!
//! Both loaders collect every missing required field of a record before
//! failing, so one error names all of them.

mod csv;
mod json;

pub use self::csv::{load_csv, profiles_from_csv_reader};
pub use self::json::{load_json, profiles_from_json_reader, profiles_from_json_str};

use crate::domain::{SchoolType, CORE_EXAMS};
use crate::error::RecommendError;
use thiserror::Error;

/// Errors raised while reading a profile table.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{context} is missing required fields: {}", fields.join(", "))]
    MissingFields {
        context: String,
        fields: Vec<&'static str>,
    },

    #[error("{context}: unknown school type `{label}`")]
    UnknownSchoolType { context: String, label: String },

    #[error("{context}: invalid `{field}`: {reason}")]
    InvalidField {
        context: String,
        field: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Model(#[from] RecommendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// Fails with `MissingFields` when any `(name, present)` pair is absent.
fn require(context: &str, fields: &[(&'static str, bool)]) -> IngestResult<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingFields {
            context: context.to_string(),
            fields: missing,
        })
    }
}

/// Resolves a school type given as a label or as a numeric code.
fn school_type_code(label: &str, context: &str) -> IngestResult<u8> {
    let by_code = label
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(SchoolType::from_code);
    by_code
        .or_else(|| SchoolType::from_label(label))
        .map(SchoolType::code)
        .ok_or_else(|| IngestError::UnknownSchoolType {
            context: context.to_string(),
            label: label.to_string(),
        })
}

/// Orders `(exam, score)` pairs into the core exam order.
fn core_exam_scores<'a, I>(scores: I, context: &str) -> IngestResult<Vec<f64>>
where
    I: IntoIterator<Item = (&'a str, f64)> + Clone,
{
    let mut ordered = Vec::with_capacity(CORE_EXAMS.len());
    let mut missing = Vec::new();
    for exam in CORE_EXAMS {
        match scores
            .clone()
            .into_iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(exam))
        {
            Some((_, score)) => ordered.push(score),
            None => missing.push(exam),
        }
    }
    if missing.is_empty() {
        Ok(ordered)
    } else {
        Err(IngestError::MissingFields {
            context: format!("exam results of {context}"),
            fields: missing,
        })
    }
}
