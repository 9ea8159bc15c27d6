//! Flat CSV profile tables, one row per profile.
//!
//! Columns: `school`, `name`, `school_type`, `exam_polish`, `exam_math`,
//! `exam_english`, `offered_subjects`, `scored_subjects`, `min_points`,
//! `avg_points`, `max_points`, and optionally `address`. Subject lists are
//! separated by `;`. `school_type` is a label or a numeric code.

use super::{require, school_type_code, IngestResult};
use crate::domain::Profile;
use crate::subjects::SubjectVocabulary;
use ::csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Row {
    school: Option<String>,
    name: Option<String>,
    school_type: Option<String>,
    address: Option<String>,
    exam_polish: Option<f64>,
    exam_math: Option<f64>,
    exam_english: Option<f64>,
    offered_subjects: Option<String>,
    scored_subjects: Option<String>,
    min_points: Option<f64>,
    avg_points: Option<f64>,
    max_points: Option<f64>,
}

/// Reads a CSV table from `path`.
pub fn load_csv(path: impl AsRef<Path>, vocabulary: &SubjectVocabulary) -> IngestResult<Vec<Profile>> {
    debug!(path = %path.as_ref().display(), "loading profiles from CSV");
    let reader = ReaderBuilder::new().trim(::csv::Trim::All).from_path(path)?;
    read_rows(reader, vocabulary)
}

pub fn profiles_from_csv_reader<R: Read>(
    reader: R,
    vocabulary: &SubjectVocabulary,
) -> IngestResult<Vec<Profile>> {
    let reader = ReaderBuilder::new().trim(::csv::Trim::All).from_reader(reader);
    read_rows(reader, vocabulary)
}

fn read_rows<R: Read>(
    mut reader: ::csv::Reader<R>,
    vocabulary: &SubjectVocabulary,
) -> IngestResult<Vec<Profile>> {
    let mut profiles = Vec::new();
    for (i, record) in reader.deserialize::<Row>().enumerate() {
        // header is line 1
        let context = format!("row {}", i + 2);
        profiles.push(build_profile(record?, &context, vocabulary)?);
    }
    debug!(profiles = profiles.len(), "profiles loaded");
    Ok(profiles)
}

fn build_profile(row: Row, context: &str, vocabulary: &SubjectVocabulary) -> IngestResult<Profile> {
    require(
        context,
        &[
            ("school", row.school.is_some()),
            ("name", row.name.is_some()),
            ("school_type", row.school_type.is_some()),
            ("exam_polish", row.exam_polish.is_some()),
            ("exam_math", row.exam_math.is_some()),
            ("exam_english", row.exam_english.is_some()),
            ("offered_subjects", row.offered_subjects.is_some()),
            ("scored_subjects", row.scored_subjects.is_some()),
            ("min_points", row.min_points.is_some()),
            ("avg_points", row.avg_points.is_some()),
            ("max_points", row.max_points.is_some()),
        ],
    )?;

    let school_type = school_type_code(row.school_type.as_deref().unwrap_or_default(), context)?;
    let benchmarks = vec![
        row.exam_polish.unwrap_or_default(),
        row.exam_math.unwrap_or_default(),
        row.exam_english.unwrap_or_default(),
    ];

    let profile = Profile::builder(row.name.unwrap_or_default(), school_type)
        .with_school(row.school.unwrap_or_default())
        .with_address(row.address.unwrap_or_default())
        .with_exam_benchmarks(benchmarks)
        .with_offered_subjects(split_subjects(row.offered_subjects.as_deref()))
        .with_scored_subjects(split_subjects(row.scored_subjects.as_deref()))
        .with_points(
            row.min_points.unwrap_or_default(),
            row.avg_points.unwrap_or_default(),
            row.max_points.unwrap_or_default(),
        )
        .build(vocabulary)?;
    Ok(profile)
}

fn split_subjects(list: Option<&str>) -> Vec<String> {
    list.unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
