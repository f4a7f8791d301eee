//! Record normalization and validation.
//!
//! Coerces the string fields of raw entries into typed grade records. A field
//! that does not coerce becomes absent; normalization never fails the run.

use crate::lexicon::Locale;
use crate::model::{GradeRecord, RawEntry, Status, TranscriptSnapshot};
use crate::ranking::{term_rank, TermRank};
use crate::statistics::GRADE_SCALE;

/// Coerce a grade token to a decimal, accepting `,` as decimal separator.
pub fn parse_grade(token: &str) -> Option<f64> {
    token
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|g| g.is_finite())
}

/// Coerce a credit token to a whole number of credits.
pub fn parse_credit(token: &str) -> Option<u32> {
    token.trim().parse().ok()
}

/// Normalize one raw entry.
pub fn normalize_entry(entry: RawEntry, locale: Locale) -> GradeRecord {
    let grade = entry.grade.as_deref().and_then(parse_grade);
    if entry.grade.is_some() && grade.is_none() {
        tracing::debug!(
            exam_code = %entry.exam_code,
            grade = ?entry.grade,
            "grade did not coerce, treating as absent"
        );
    }

    let credit = parse_credit(&entry.credit);
    if credit.is_none() {
        tracing::debug!(
            exam_code = %entry.exam_code,
            credit = %entry.credit,
            "credit did not coerce, treating as absent"
        );
    }

    // The grammar only admits digit runs here; overflow degrades to 1.
    let attempt: u32 = entry.attempt.parse().unwrap_or_else(|_| {
        tracing::debug!(
            exam_code = %entry.exam_code,
            attempt = %entry.attempt,
            "attempt did not coerce, treating as 1"
        );
        1
    });

    GradeRecord {
        exam_code: entry.exam_code,
        description: entry.description,
        term: entry.term,
        attempt,
        grade,
        status: entry.status.map(|s| Status::from_label(locale, &s)),
        credit,
        remark: entry.remark,
        category: entry.category,
    }
}

/// Normalize all raw entries into a snapshot, preserving order.
pub fn normalize(entries: Vec<RawEntry>, locale: Locale) -> TranscriptSnapshot {
    TranscriptSnapshot::new(
        entries
            .into_iter()
            .map(|e| normalize_entry(e, locale))
            .collect(),
    )
}

/// A warning from record validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Exam code of the offending record.
    pub exam_code: String,
    /// Term of the offending record.
    pub term: String,
    /// Warning message.
    pub message: String,
}

/// Check normalized records for conditions worth a manual look.
pub fn validate_records(records: &[GradeRecord], locale: Locale) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |record: &GradeRecord, message: String| {
        warnings.push(ValidationWarning {
            exam_code: record.exam_code.clone(),
            term: record.term.clone(),
            message,
        });
    };

    for record in records {
        if record.credit.is_none() {
            warn(record, "credit is missing or not a number".into());
        }

        if record.attempt == 0 {
            warn(record, "attempt 0 is not a valid attempt number".into());
        }

        if term_rank(&record.term) == TermRank::Unrecognized {
            warn(record, format!("unrecognized term: {}", record.term));
        }

        match &record.status {
            Some(Status::Other(label)) => warn(
                record,
                format!("status '{label}' is not a recognized {locale} status and is excluded"),
            ),
            None => warn(record, "no status, excluded from statistics".into()),
            _ => {}
        }

        if let Some(grade) = record.grade {
            if !GRADE_SCALE.iter().any(|s| (s - grade).abs() < 1e-9) {
                warn(record, format!("grade {grade} is not on the grade scale"));
            }
        }
    }

    warnings
}
