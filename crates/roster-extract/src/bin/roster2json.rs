use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use roster_extract::{
    DEFAULT_AGENT_ID, ExtractOptions, PageSelection, RosterExtraction, extract_roster,
    write_shifts_csv,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "roster2json",
    version,
    about = "Convert duty-roster PDFs into shift records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract shifts from a roster PDF.
    Extract(ExtractArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Agent identifier stamped on every shift.
    #[arg(long, default_value = DEFAULT_AGENT_ID)]
    agent_id: String,

    /// First day of roster week 1 (YYYY-MM-DD). Defaults to the first of the current month.
    #[arg(long)]
    start_date: Option<String>,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print every logged cell or row failure to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    let start_date = args
        .start_date
        .as_deref()
        .map(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .transpose()
        .context("failed to parse --start-date, expected YYYY-MM-DD")?;

    Ok(ExtractOptions {
        agent_id: args.agent_id.clone(),
        start_date,
        pages,
    })
}

fn write_output(extraction: &RosterExtraction, args: &ExtractArgs) -> Result<()> {
    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(out);

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, extraction)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_shifts_csv(&mut out, &extraction.shifts)?,
    }
    out.flush()?;
    Ok(())
}

fn log_report(extraction: &RosterExtraction, verbose: bool) {
    let logs = &extraction.logs;
    if logs.errors.is_empty() {
        return;
    }

    eprintln!(
        "warning: {} of {} cell(s) converted, {} issue(s) logged",
        logs.shifts_converted,
        logs.total_cells_detected,
        logs.errors.len()
    );
    if verbose {
        for error in &logs.errors {
            eprintln!("  - {error}");
        }
    }
}

fn run_extract(args: &ExtractArgs) -> Result<RosterExtraction> {
    let options = parse_options(args)?;
    let extraction = extract_roster(&args.input, &options)
        .with_context(|| format!("failed to extract roster from '{}'", args.input.display()))?;
    write_output(&extraction, args)?;
    Ok(extraction)
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster_extract=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(extraction) => {
                log_report(&extraction, args.verbose);
                if extraction.shifts.is_empty() {
                    ExitCode::from(2)
                } else {
                    ExitCode::SUCCESS
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
