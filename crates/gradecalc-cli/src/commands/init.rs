//! The `gradecalc init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradecalc.toml").exists() {
        println!("gradecalc.toml already exists, skipping.");
    } else {
        std::fs::write("gradecalc.toml", SAMPLE_CONFIG)?;
        println!("Created gradecalc.toml");
    }

    println!("\nNext steps:");
    println!("  1. Put your transcript next to it as abschluss*.pdf");
    println!("  2. Run: gradecalc validate");
    println!("  3. Run: gradecalc");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradecalc configuration

# Transcript language: "de" or "en"
locale = "de"

# Credits required for the degree
ects_required = 210

# Credits earned in modules that carry no grade
ects_without_grade = 34

# Snapshot written by every run and read by --csv
snapshot_file = "grades.csv"

# The transcript is the newest <prefix>*.<extension> in the working directory
document_prefix = "abschluss"
document_extension = "pdf"
"#;
