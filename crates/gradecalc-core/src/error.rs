//! Error types for the parsing and statistics stages.
//!
//! Both are conditions the caller must handle distinctly: an empty parse
//! aborts the run, an empty denominator is annotated in the report.

use thiserror::Error;

use crate::lexicon::Locale;

/// Errors raised while turning transcript text into entries.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No line of the text matched the entry grammar.
    #[error(
        "no transcript entries found for locale '{locale}' ({lines} lines scanned); \
         check the document layout or try another --lang"
    )]
    NoEntries { locale: Locale, lines: usize },

    /// The entry grammar assembled from the lexicon failed to compile.
    #[error("invalid entry pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors raised by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatisticsError {
    /// The weighted average has a zero credit denominator.
    #[error("weighted average is undefined: no graded credits in scope")]
    NoGradedCredits,
}
