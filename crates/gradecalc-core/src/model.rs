//! Core data model types for gradecalc.
//!
//! These are the types every stage of the pipeline passes along: raw entries
//! straight out of the transcript text, normalized grade records, and the
//! snapshot that holds one run's records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::{localize, Key, Locale};

/// Module grouping inherited from the nearest header line above an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    GeneralElective,
    /// Neutral category set by the compulsory-module header.
    Compulsory,
    SpecificElective,
    InternshipTerm,
}

impl Category {
    /// The fixed tag written to snapshots. Compulsory modules carry no tag.
    pub fn tag(self) -> &'static str {
        match self {
            Category::GeneralElective => "AWPF",
            Category::Compulsory => "",
            Category::SpecificElective => "FWPF",
            Category::InternshipTerm => "PS",
        }
    }

    /// Inverse of [`Category::tag`]. An empty tag reads back as compulsory.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "AWPF" => Some(Category::GeneralElective),
            "" => Some(Category::Compulsory),
            "FWPF" => Some(Category::SpecificElective),
            "PS" => Some(Category::InternshipTerm),
            _ => None,
        }
    }
}

/// Season of an academic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Summer,
}

/// Result status of a course attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    InProgress,
    /// Any label outside the recognized set, kept verbatim.
    Other(String),
}

impl Status {
    /// Resolve a transcript label against the locale's status vocabulary.
    pub fn from_label(locale: Locale, label: &str) -> Self {
        if label == localize(locale, Key::Passed) {
            Status::Passed
        } else if label == localize(locale, Key::InProgress) {
            Status::InProgress
        } else {
            Status::Other(label.to_string())
        }
    }

    /// The label this status is displayed with in `locale`.
    pub fn label(&self, locale: Locale) -> &str {
        match self {
            Status::Passed => localize(locale, Key::Passed),
            Status::InProgress => localize(locale, Key::InProgress),
            Status::Other(label) => label,
        }
    }

    /// Only passed and in-progress attempts count towards the statistics.
    pub fn counts_towards_statistics(&self) -> bool {
        matches!(self, Status::Passed | Status::InProgress)
    }
}

/// One entry line as it was matched in the transcript text.
///
/// Optional tail fields are `None` when the line left them out; they are
/// never empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub exam_code: String,
    pub description: String,
    pub term: String,
    pub attempt: String,
    /// Grade with `,` already replaced by `.`.
    pub grade: Option<String>,
    pub status: Option<String>,
    pub credit: String,
    pub remark: Option<String>,
    /// Category in effect when the line matched.
    pub category: Option<Category>,
}

/// A normalized transcript line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Institution-assigned exam identifier.
    pub exam_code: String,
    /// Course or module title.
    pub description: String,
    /// Term token, e.g. `WiSe22/23` or `Summer23`.
    pub term: String,
    /// Attempt number, starting at 1.
    pub attempt: u32,
    /// Numeric grade, absent when ungraded or not coercible.
    pub grade: Option<f64>,
    /// Result status, absent when the line carried none.
    pub status: Option<Status>,
    /// Credit points, absent only when coercion failed.
    pub credit: Option<u32>,
    /// Free-text remark.
    pub remark: Option<String>,
    /// Category inherited from the header context.
    pub category: Option<Category>,
}

impl GradeRecord {
    /// Graded records carry both a grade and a credit value.
    pub fn is_graded(&self) -> bool {
        self.grade.is_some() && self.credit.is_some()
    }

    /// Whether the record's status admits it to the statistics.
    pub fn is_eligible(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(Status::counts_towards_statistics)
    }

    /// Serialize back into the transcript's entry-line layout.
    ///
    /// Absent optional fields leave an empty slot between single spaces, which
    /// the entry grammar reads back as absent.
    pub fn to_entry_line(&self, locale: Locale) -> String {
        format!(
            "{} {} {} {} {} {} {} {}",
            self.exam_code,
            self.description,
            self.term,
            self.attempt,
            self.grade.map(|g| g.to_string()).unwrap_or_default(),
            self.status.as_ref().map(|s| s.label(locale)).unwrap_or(""),
            self.credit.map(|c| c.to_string()).unwrap_or_default(),
            self.remark.as_deref().unwrap_or(""),
        )
        .trim_end()
        .to_string()
    }
}

/// Render a grade with one decimal for display, e.g. `2.3` or `1.0`.
///
/// Lossy for grades with more decimals; snapshots and entry lines write the
/// full value instead.
pub fn format_grade(grade: f64) -> String {
    format!("{grade:.1}")
}

/// The ordered collection of records for one run.
///
/// All transforms return new values; the snapshot itself is never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSnapshot {
    pub records: Vec<GradeRecord>,
}

impl TranscriptSnapshot {
    pub fn new(records: Vec<GradeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Split into (graded, ungraded), preserving order.
    pub fn partition(&self) -> (Vec<&GradeRecord>, Vec<&GradeRecord>) {
        self.records.iter().partition(|r| r.is_graded())
    }

    /// Graded records whose status counts towards the statistics.
    pub fn eligible_graded(&self) -> Vec<&GradeRecord> {
        self.records
            .iter()
            .filter(|r| r.is_graded() && r.is_eligible())
            .collect()
    }

    /// Distinct term tokens in first-seen order.
    pub fn terms(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.term.as_str()) {
                seen.push(record.term.as_str());
            }
        }
        seen
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
