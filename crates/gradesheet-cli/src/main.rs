//! gradesheet CLI — parse exam-result sheets into JSON and CSV.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use gradesheet_core::model::InputKind;

mod run;
mod summary;

#[derive(Parser)]
#[command(
    name = "gradesheet",
    version,
    about = "Parse exam result PDFs/text into structured question results"
)]
struct Cli {
    /// Path(s) to input file(s) (.pdf or plain text)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Input format: auto, pdf, or text (auto infers from the file extension)
    #[arg(long, default_value_t = InputKind::Auto)]
    input_type: InputKind,

    /// Path to write JSON output. If omitted, JSON is printed to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Path to write CSV of parsed question rows
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Path to write CSV of per-question aggregate stats
    #[arg(long)]
    stats_csv: Option<PathBuf>,

    /// Path to write CSV of per-section aggregate stats (e.g. T3)
    #[arg(long)]
    section_stats_csv: Option<PathBuf>,

    /// Path to write CSV of per-subsection aggregate stats (e.g. T3A)
    #[arg(long)]
    subsection_stats_csv: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print a table of the weakest sections to stderr
    #[arg(long)]
    summary: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradesheet=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    // Every input must exist before any of them is processed.
    if let Some(missing) = cli.inputs.iter().find(|p| !p.exists()) {
        let err = gradesheet_core::Error::MissingInput(missing.clone());
        eprintln!("ERROR: {err}");
        process::exit(2);
    }

    let options = run::RunOptions {
        inputs: cli.inputs,
        input_kind: cli.input_type,
        out: cli.out,
        csv: cli.csv,
        stats_csv: cli.stats_csv,
        section_stats_csv: cli.section_stats_csv,
        subsection_stats_csv: cli.subsection_stats_csv,
        pretty: cli.pretty,
        summary: cli.summary,
        config: cli.config,
    };

    if let Err(e) = run::execute(options) {
        let kind = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<gradesheet_core::Error>())
            .map(|err| err.kind())
            .unwrap_or("UnhandledParsingFailure");
        eprintln!("ERROR: {kind}: {e:#}");
        process::exit(1);
    }
}
