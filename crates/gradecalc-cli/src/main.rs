//! gradecalc CLI: grade statistics from academic transcripts.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gradecalc_core::lexicon::Locale;

mod commands;

#[derive(Parser)]
#[command(
    name = "gradecalc",
    version,
    about = "Grade statistics from academic transcripts",
    long_about = "Parses a transcript PDF (abschluss*.pdf in the working directory) or a \
                  previously written CSV snapshot and prints credit totals, weighted \
                  averages and the grade distribution.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the transcript and list records that need a manual look
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Create a starter gradecalc.toml
    Init,
}

/// Where records come from and how they are labelled.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Transcript locale: de or en
    #[arg(long = "lang")]
    pub lang: Option<Locale>,

    /// Load records from the CSV snapshot
    #[arg(long, conflicts_with_all = ["pdf", "document"])]
    pub csv: bool,

    /// Parse the transcript PDF (default)
    #[arg(long)]
    pub pdf: bool,

    /// Transcript document to parse instead of searching the working directory
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// CSV snapshot path
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Credits required for the degree
    #[arg(long)]
    pub ects_required: Option<u32>,

    /// Credits earned in modules without a grade
    #[arg(long)]
    pub ects_without_grade: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Do not write the CSV snapshot
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gradecalc=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Validate { source }) => commands::validate::execute(source),
        Some(Commands::Init) => commands::init::execute(),
        None => commands::report::execute(cli.report),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
