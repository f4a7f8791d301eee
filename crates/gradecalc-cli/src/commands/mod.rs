pub mod init;
pub mod report;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use gradecalc_core::config::{load_config_from, GradecalcConfig};
use gradecalc_core::engine::RecordSource;
use gradecalc_core::lexicon::Locale;
use gradecalc_sources::{find_document, CsvSnapshot, SourceError};

use crate::SourceArgs;

/// Settings shared by every command that reads records.
pub struct Resolved {
    pub config: GradecalcConfig,
    pub locale: Locale,
    pub source: RecordSource,
    pub store: CsvSnapshot,
}

/// Combine the config file with command-line flags. Flags win.
pub fn resolve(args: &SourceArgs) -> Result<Resolved> {
    let config = load_config_from(args.config.as_deref())?;
    let locale = args.lang.unwrap_or(config.locale);

    let snapshot_path = args
        .snapshot
        .clone()
        .unwrap_or_else(|| config.snapshot_file.clone());

    let source = if args.csv {
        RecordSource::Snapshot
    } else {
        let document = match &args.document {
            Some(path) => path.clone(),
            None => find_document(
                Path::new("."),
                &config.document_prefix,
                &config.document_extension,
            )
            .map_err(|e| {
                let missing = e
                    .downcast_ref::<SourceError>()
                    .is_some_and(SourceError::is_not_found);
                if missing && snapshot_path.is_file() {
                    e.context(format!(
                        "a snapshot exists at {}; rerun with --csv to use it",
                        snapshot_path.display()
                    ))
                } else {
                    e
                }
            })?,
        };
        RecordSource::Document(document)
    };

    tracing::debug!(%locale, ?source, "snapshot {}", snapshot_path.display());

    Ok(Resolved {
        store: CsvSnapshot::new(snapshot_path, locale),
        config,
        locale,
        source,
    })
}

/// Display form of a path without the `./` that directory scans prepend.
pub fn display_path(path: &Path) -> PathBuf {
    path.strip_prefix(".").unwrap_or(path).to_path_buf()
}
