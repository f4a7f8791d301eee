//! gradecalc-report: rendering of records and aggregate reports.
//!
//! The console renderer prints the report as a sequence of tables; the JSON
//! renderer emits the same content for other tools.

pub mod console;
pub mod json;

pub use console::render_console;
pub use json::render_json;
