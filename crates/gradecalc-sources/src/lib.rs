//! gradecalc-sources: transcript sources and sinks.
//!
//! Implements the `TextExtractor` and `SnapshotStore` seams of
//! `gradecalc-core`: PDF text extraction, transcript document discovery and
//! the locale-labelled CSV snapshot.

pub mod discovery;
pub mod error;
pub mod mock;
pub mod pdf;
pub mod snapshot;

pub use discovery::find_document;
pub use error::SourceError;
pub use mock::StaticText;
pub use pdf::PdfExtractor;
pub use snapshot::CsvSnapshot;
