//! The `gradecalc validate` command.

use anyhow::Result;

use gradecalc_core::engine::{Engine, EngineConfig, RecordSource};
use gradecalc_core::normalize::validate_records;
use gradecalc_core::traits::SnapshotStore;
use gradecalc_sources::PdfExtractor;

use crate::SourceArgs;

pub fn execute(args: SourceArgs) -> Result<()> {
    let resolved = super::resolve(&args)?;

    let extractor = PdfExtractor::new();
    let engine = Engine::new(
        &extractor,
        &resolved.store,
        EngineConfig {
            locale: resolved.locale,
            policy: resolved.config.policy(),
            save_snapshot: false,
        },
    );
    let snapshot = engine.load(&resolved.source)?;

    let origin = match &resolved.source {
        RecordSource::Document(path) => super::display_path(path),
        RecordSource::Snapshot => super::display_path(resolved.store.location()),
    };
    let (graded, ungraded) = snapshot.partition();
    println!(
        "{}: {} records ({} graded, {} without grade)",
        origin.display(),
        snapshot.len(),
        graded.len(),
        ungraded.len()
    );

    let warnings = validate_records(&snapshot.records, resolved.locale);
    for w in &warnings {
        println!("  [{} {}] WARNING: {}", w.exam_code, w.term, w.message);
    }

    if warnings.is_empty() {
        println!("All records valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
