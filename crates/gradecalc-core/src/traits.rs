//! Seams to the pipeline's external collaborators.
//!
//! Text extraction and snapshot persistence are implemented in
//! `gradecalc-sources`; the core only sees these traits.

use std::path::Path;

use crate::model::GradeRecord;

/// Turns a source document into plain text, all pages concatenated.
pub trait TextExtractor {
    /// Human-readable extractor name (e.g. "pdf").
    fn name(&self) -> &str;

    /// Extract the document's text. Failures are fatal to the run.
    fn extract_text(&self, path: &Path) -> anyhow::Result<String>;
}

/// Loads and saves the flat tabular snapshot of a run's records.
pub trait SnapshotStore {
    /// Where the snapshot lives, for messages.
    fn location(&self) -> &Path;

    /// Load records in stored order.
    fn load(&self) -> anyhow::Result<Vec<GradeRecord>>;

    /// Replace the stored snapshot with `records`.
    fn save(&self, records: &[GradeRecord]) -> anyhow::Result<()>;
}
