//! PDF text extraction.

use std::path::Path;

use gradecalc_core::traits::TextExtractor;

use crate::error::SourceError;

/// Extracts the text of every page of a PDF, in page order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extract_text(&self, path: &Path) -> anyhow::Result<String> {
        if !path.is_file() {
            return Err(SourceError::Extraction {
                path: path.to_path_buf(),
                message: "file does not exist".into(),
            }
            .into());
        }

        let text = pdf_extract::extract_text(path).map_err(|e| SourceError::Extraction {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            bytes = text.len(),
            lines = text.lines().count(),
            "extracted text from {}",
            path.display()
        );
        Ok(text)
    }
}
