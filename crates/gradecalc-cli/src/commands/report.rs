//! The default `gradecalc` command: parse, aggregate and print the report.

use anyhow::Result;

use gradecalc_core::engine::{Engine, EngineConfig};
use gradecalc_report::{render_console, render_json};
use gradecalc_sources::PdfExtractor;

use crate::{OutputFormat, ReportArgs};

pub fn execute(args: ReportArgs) -> Result<()> {
    let resolved = super::resolve(&args.source)?;

    let mut policy = resolved.config.policy();
    if let Some(required) = args.ects_required {
        policy.required = required;
    }
    if let Some(without_grade) = args.ects_without_grade {
        policy.without_grade = without_grade;
    }

    let extractor = PdfExtractor::new();
    let engine = Engine::new(
        &extractor,
        &resolved.store,
        EngineConfig {
            locale: resolved.locale,
            policy,
            save_snapshot: !args.no_save,
        },
    );

    let output = engine.run(&resolved.source)?;

    match args.format {
        OutputFormat::Table => print!("{}", render_console(&output, resolved.locale)),
        OutputFormat::Json => println!("{}", render_json(&output, resolved.locale)?),
    }

    Ok(())
}
