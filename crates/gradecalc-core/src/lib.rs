//! gradecalc-core: transcript parsing, ranking and grade statistics.
//!
//! This crate defines the record model, the locale lexicon, the transcript
//! line classifier and the aggregation logic that the rest of gradecalc
//! builds on.

pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod ranking;
pub mod statistics;
pub mod traits;
