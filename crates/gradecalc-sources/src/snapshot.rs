//! CSV snapshot of a run's records.
//!
//! Column headers are the locale's display labels, so a snapshot written
//! with one locale can only be read back with the same locale.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use gradecalc_core::lexicon::{localize, Key, Locale};
use gradecalc_core::model::{Category, GradeRecord, Status};
use gradecalc_core::normalize::{parse_credit, parse_grade};
use gradecalc_core::traits::SnapshotStore;

use crate::error::SourceError;

/// A snapshot stored as a CSV file.
#[derive(Debug, Clone)]
pub struct CsvSnapshot {
    path: PathBuf,
    locale: Locale,
}

impl CsvSnapshot {
    pub fn new(path: impl Into<PathBuf>, locale: Locale) -> Self {
        Self {
            path: path.into(),
            locale,
        }
    }

    fn header(&self) -> Vec<&'static str> {
        Key::COLUMNS
            .iter()
            .map(|key| localize(self.locale, *key))
            .collect()
    }

    fn row(&self, record: &GradeRecord) -> Vec<String> {
        vec![
            record.exam_code.clone(),
            record.description.clone(),
            record.term.clone(),
            record.attempt.to_string(),
            record.grade.map(|g| g.to_string()).unwrap_or_default(),
            record
                .status
                .as_ref()
                .map(|s| s.label(self.locale).to_string())
                .unwrap_or_default(),
            record.credit.map(|c| c.to_string()).unwrap_or_default(),
            record.remark.clone().unwrap_or_default(),
            record.category.map(|c| c.tag().to_string()).unwrap_or_default(),
        ]
    }

    /// Column index of every key, in [`Key::COLUMNS`] order.
    fn column_indices(&self, headers: &StringRecord) -> Result<Vec<usize>, SourceError> {
        Key::COLUMNS
            .iter()
            .map(|key| {
                let label = localize(self.locale, *key);
                headers
                    .iter()
                    .position(|h| h.trim() == label)
                    .ok_or_else(|| SourceError::MissingColumn {
                        path: self.path.clone(),
                        column: label.to_string(),
                    })
            })
            .collect()
    }

    fn parse_row(
        &self,
        row_number: usize,
        row: &StringRecord,
        indices: &[usize],
    ) -> Result<GradeRecord, SourceError> {
        let field = |i: usize| row.get(indices[i]).unwrap_or("").trim();
        let optional = |i: usize| Some(field(i)).filter(|s| !s.is_empty());

        let attempt_raw = field(3);
        let attempt = attempt_raw
            .parse()
            .map_err(|_| SourceError::InvalidField {
                row: row_number,
                column: localize(self.locale, Key::Attempt).to_string(),
                value: attempt_raw.to_string(),
            })?;

        let category = match Category::from_tag(field(8)) {
            Some(category) => Some(category),
            None => {
                tracing::warn!(row = row_number, tag = field(8), "unknown category tag");
                None
            }
        };

        Ok(GradeRecord {
            exam_code: field(0).to_string(),
            description: field(1).to_string(),
            term: field(2).to_string(),
            attempt,
            grade: optional(4).and_then(parse_grade),
            status: optional(5).map(|s| Status::from_label(self.locale, s)),
            credit: optional(6).and_then(parse_snapshot_credit),
            remark: optional(7).map(str::to_string),
            category,
        })
    }
}

/// Credits may have been written as floats (`5.0`) by other tools.
fn parse_snapshot_credit(token: &str) -> Option<u32> {
    parse_credit(token).or_else(|| {
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(v))
            .map(|v| v as u32)
    })
}

impl SnapshotStore for CsvSnapshot {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<GradeRecord>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("failed to open snapshot: {}", self.path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("failed to read header of {}", self.path.display()))?
            .clone();
        let indices = self.column_indices(&headers)?;

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            // Row numbers count the header as row 1.
            let row_number = i + 2;
            let row = row.with_context(|| {
                format!("failed to read row {row_number} of {}", self.path.display())
            })?;
            records.push(self.parse_row(row_number, &row, &indices)?);
        }

        tracing::debug!(records = records.len(), "read {}", self.path.display());
        Ok(records)
    }

    fn save(&self, records: &[GradeRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = WriterBuilder::new()
            .from_path(&self.path)
            .with_context(|| format!("failed to create snapshot: {}", self.path.display()))?;

        writer.write_record(self.header())?;
        for record in records {
            writer.write_record(self.row(record))?;
        }
        writer.flush()?;
        Ok(())
    }
}
