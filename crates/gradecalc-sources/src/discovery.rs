//! Transcript document discovery.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

use crate::error::SourceError;

/// Find the transcript document in `dir`.
///
/// A candidate's file name starts with `prefix` (case-sensitive) and ends with
/// `.{extension}`. When several files match, the most recently modified one
/// wins and ties go to the lexically smallest name.
pub fn find_document(dir: &Path, prefix: &str, extension: &str) -> Result<PathBuf> {
    let suffix = format!(".{}", extension.trim_start_matches('.'));

    let mut candidates: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !(name.starts_with(prefix) && name.ends_with(&suffix)) {
            continue;
        }
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        candidates.push((modified, entry.path()));
    }

    candidates.sort_by(|(ta, pa), (tb, pb)| tb.cmp(ta).then_with(|| pa.cmp(pb)));

    if candidates.len() > 1 {
        tracing::warn!(
            candidates = candidates.len(),
            "several transcript documents match {prefix}*{suffix}, using the newest: {}",
            candidates[0].1.display()
        );
    }

    match candidates.into_iter().next() {
        Some((_, path)) => Ok(path),
        None => Err(SourceError::DocumentNotFound {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
        .into()),
    }
}
