//! Fixed-text extractor for testing.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use gradecalc_core::traits::TextExtractor;

/// A text extractor that returns the same text for every document.
///
/// Lets the pipeline run against transcript text without a real PDF.
pub struct StaticText {
    text: String,
    /// Number of extractions performed.
    call_count: AtomicU32,
    /// Last path extracted from.
    last_path: Mutex<Option<PathBuf>>,
}

impl StaticText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            call_count: AtomicU32::new(0),
            last_path: Mutex::new(None),
        }
    }

    /// Get the number of extractions performed.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last path passed to [`TextExtractor::extract_text`].
    pub fn last_path(&self) -> Option<PathBuf> {
        self.last_path
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl TextExtractor for StaticText {
    fn name(&self) -> &str {
        "static"
    }

    fn extract_text(&self, path: &Path) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_path.lock() {
            *last = Some(path.to_path_buf());
        }
        Ok(self.text.clone())
    }
}
