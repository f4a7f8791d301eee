//! Pipeline orchestrator.
//!
//! Runs extract → parse → normalize → sort → aggregate in one synchronous
//! pass and hands the results to the caller for rendering.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::lexicon::Locale;
use crate::model::TranscriptSnapshot;
use crate::normalize::normalize;
use crate::parser::TranscriptParser;
use crate::ranking::sort_records;
use crate::statistics::{AggregateReport, CreditPolicy};
use crate::traits::{SnapshotStore, TextExtractor};

/// Where a run takes its records from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// Parse a transcript document.
    Document(PathBuf),
    /// Load a previously written snapshot.
    Snapshot,
}

/// Configuration for the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    pub locale: Locale,
    pub policy: CreditPolicy,
    /// Write the sorted records back to the snapshot store.
    pub save_snapshot: bool,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Records in transcript order, present only when a document was parsed.
    pub extracted: Option<TranscriptSnapshot>,
    /// All records in composite order (category, term, exam code).
    pub snapshot: TranscriptSnapshot,
    pub report: AggregateReport,
}

/// The pipeline and its collaborators.
pub struct Engine<'a> {
    extractor: &'a dyn TextExtractor,
    store: &'a dyn SnapshotStore,
    config: EngineConfig,
}

impl<'a> Engine<'a> {
    pub fn new(
        extractor: &'a dyn TextExtractor,
        store: &'a dyn SnapshotStore,
        config: EngineConfig,
    ) -> Self {
        Self {
            extractor,
            store,
            config,
        }
    }

    /// Parse a document into a snapshot in transcript order.
    pub fn read_document(&self, path: &std::path::Path) -> Result<TranscriptSnapshot> {
        let text = self
            .extractor
            .extract_text(path)
            .with_context(|| format!("failed to extract text from {}", path.display()))?;

        let parser = TranscriptParser::new(self.config.locale)?;
        let entries = parser
            .parse(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        tracing::info!(
            extractor = self.extractor.name(),
            entries = entries.len(),
            "parsed {}",
            path.display()
        );
        Ok(normalize(entries, self.config.locale))
    }

    /// Load the records of a run from `source`, without sorting.
    pub fn load(&self, source: &RecordSource) -> Result<TranscriptSnapshot> {
        match source {
            RecordSource::Document(path) => self.read_document(path),
            RecordSource::Snapshot => {
                let records = self.store.load().with_context(|| {
                    format!("failed to load snapshot {}", self.store.location().display())
                })?;
                tracing::info!(
                    records = records.len(),
                    "loaded snapshot {}",
                    self.store.location().display()
                );
                Ok(TranscriptSnapshot::new(records))
            }
        }
    }

    /// Run the whole pipeline.
    pub fn run(&self, source: &RecordSource) -> Result<RunOutput> {
        let loaded = self.load(source)?;
        let snapshot = TranscriptSnapshot::new(sort_records(&loaded.records, true));

        if self.config.save_snapshot {
            self.store.save(&snapshot.records).with_context(|| {
                format!("failed to write snapshot {}", self.store.location().display())
            })?;
            tracing::info!(
                records = snapshot.len(),
                "wrote snapshot {}",
                self.store.location().display()
            );
        }

        let report = AggregateReport::compute(&snapshot, self.config.policy);
        let extracted = matches!(source, RecordSource::Document(_)).then_some(loaded);

        Ok(RunOutput {
            extracted,
            snapshot,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, GradeRecord, Status};
    use std::cell::RefCell;
    use std::path::Path;

    struct FixedText(&'static str);

    impl TextExtractor for FixedText {
        fn name(&self) -> &str {
            "fixed"
        }

        fn extract_text(&self, _path: &Path) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        records: RefCell<Vec<GradeRecord>>,
        path: PathBuf,
    }

    impl SnapshotStore for MemoryStore {
        fn location(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> Result<Vec<GradeRecord>> {
            Ok(self.records.borrow().clone())
        }

        fn save(&self, records: &[GradeRecord]) -> Result<()> {
            *self.records.borrow_mut() = records.to_vec();
            Ok(())
        }
    }

    const TRANSCRIPT: &str = "\
Pflichtmodule
1234567 Intro to Systems WiSe22/23 1 2,3 bestanden 5
Allgemeinwissenschaftliches Wahlpflichtmodul
7654321 Ethics SoSe23 1  wip 3 pending
";

    fn config(save_snapshot: bool) -> EngineConfig {
        EngineConfig {
            locale: Locale::De,
            policy: CreditPolicy::default(),
            save_snapshot,
        }
    }

    #[test]
    fn document_run_parses_sorts_and_saves() {
        let extractor = FixedText(TRANSCRIPT);
        let store = MemoryStore::default();
        let engine = Engine::new(&extractor, &store, config(true));

        let output = engine
            .run(&RecordSource::Document("abschluss.pdf".into()))
            .unwrap();

        let extracted = output.extracted.unwrap();
        assert_eq!(extracted.records[0].exam_code, "1234567");

        // General electives sort first.
        assert_eq!(output.snapshot.records[0].exam_code, "7654321");
        assert_eq!(
            output.snapshot.records[0].category,
            Some(Category::GeneralElective)
        );
        assert_eq!(output.snapshot.records[0].status, Some(Status::InProgress));

        assert_eq!(output.report.overall_average(), Ok(2.3));
        assert_eq!(output.report.credits.with_grade, 5);
        assert_eq!(store.records.borrow().len(), 2);
    }

    #[test]
    fn snapshot_run_has_no_extracted_table() {
        let extractor = FixedText("");
        let store = MemoryStore::default();
        let entries = crate::parser::parse_transcript(TRANSCRIPT, Locale::De).unwrap();
        store
            .save(&normalize(entries, Locale::De).records)
            .unwrap();

        let engine = Engine::new(&extractor, &store, config(false));
        let output = engine.run(&RecordSource::Snapshot).unwrap();
        assert!(output.extracted.is_none());
        assert_eq!(output.snapshot.len(), 2);
    }

    #[test]
    fn empty_document_is_fatal() {
        let extractor = FixedText("Seite 1\nSeite 2\n");
        let store = MemoryStore::default();
        let engine = Engine::new(&extractor, &store, config(true));
        let err = engine
            .run(&RecordSource::Document("abschluss.pdf".into()))
            .unwrap_err();
        assert!(format!("{err:#}").contains("no transcript entries"));
        assert!(store.records.borrow().is_empty());
    }
}
