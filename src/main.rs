//! CLI entry point for the bikeshare explorer.
//!
//! `explore` (the default) runs the interactive prompt loop; `report` computes the statistics for
//! one selection given on the command line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use bikeshare_explorer::config::{DATA_DIR_ENV, DEFAULT_PAGE_SIZE, ExplorerConfig, OutputFormat};
use bikeshare_explorer::execution::{
    ExecutionEngine, ExecutionOptions, TimedReport, TracingExecutionObserver,
};
use bikeshare_explorer::ingestion::{IngestionOptions, TracingObserver};
use bikeshare_explorer::interactive::{Prompter, SEPARATOR, render_page};
use bikeshare_explorer::loader;
use bikeshare_explorer::registry::FilterSelection;
use bikeshare_explorer::stats::ReportKind;
use bikeshare_explorer::types::DataSet;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, global = true, env = DATA_DIR_ENV, default_value = ".")]
    data_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Compute reports one after another on the main thread
    #[arg(long, global = true, default_value_t = false)]
    sequential: bool,

    /// Worker threads for parallel report computation
    #[arg(long, global = true, value_name = "N")]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for a city, month and day, show statistics, and offer raw data (default)
    Explore {
        /// Rows per page of raw data
        #[arg(
            long,
            default_value_t = DEFAULT_PAGE_SIZE as u64,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        page_size: u64,
    },
    /// Print statistics for one selection without prompting
    Report {
        /// Chicago, New York City or Washington
        #[arg(long)]
        city: String,

        /// Month name or "all"
        #[arg(long, default_value = "all")]
        month: String,

        /// Weekday name or "all"
        #[arg(long, default_value = "all")]
        day: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Comma-separated subset of reports (time, station, station-ranking, trip-duration,
        /// trip-length, user)
        #[arg(long, value_delimiter = ',')]
        reports: Vec<ReportKind>,

        /// Also print the first N filtered rows
        #[arg(long, value_name = "N", default_value_t = 0)]
        raw_rows: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ExplorerConfig {
        data_dir: cli.data_dir,
        execution: ExecutionOptions {
            num_threads: cli.threads,
            parallel: !cli.sequential,
        },
        ..ExplorerConfig::default()
    };
    debug!(?config, "configuration");

    let ingestion = IngestionOptions {
        observer: Some(TracingObserver::shared()),
        ..IngestionOptions::default()
    };
    let engine = ExecutionEngine::new(config.execution.clone())
        .context("failed to start report workers")?
        .with_observer(Arc::new(TracingExecutionObserver));

    match cli.command.unwrap_or(Commands::Explore {
        page_size: DEFAULT_PAGE_SIZE as u64,
    }) {
        Commands::Explore { page_size } => {
            config.page_size = usize::try_from(page_size).context("page size too large")?;
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
            explore(&mut prompter, &config, &ingestion, &engine)?;
        }
        Commands::Report {
            city,
            month,
            day,
            format,
            reports,
            raw_rows,
        } => {
            config.format = format;
            if !reports.is_empty() {
                config.reports = reports;
            }
            let selection = FilterSelection::parse(&city, &month, &day)?;
            let trips = loader::load(&config.data_dir, &selection, &ingestion)?;
            let results = engine.run(&trips, &config.reports);

            let mut out = io::stdout().lock();
            match config.format {
                OutputFormat::Text => {
                    print_reports(&mut out, &results)?;
                    if raw_rows > 0 {
                        let rows = trips.window(0, raw_rows);
                        render_page(&trips.schema, 0, rows, &mut out)?;
                    }
                }
                OutputFormat::Json => print_json(&mut out, &selection, &trips, &results)?,
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Prompt, report, page and repeat until the user declines to restart or input ends.
fn explore<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &ExplorerConfig,
    ingestion: &IngestionOptions,
    engine: &ExecutionEngine,
) -> Result<()> {
    loop {
        let selection = match prompter.ask_filters() {
            Ok(selection) => selection,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("input closed, leaving");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let trips = match loader::load(&config.data_dir, &selection, ingestion) {
            Ok(trips) => trips,
            Err(e) => {
                writeln!(prompter.output(), "\n{e}\n")?;
                continue;
            }
        };
        if trips.is_empty() {
            warn!(%selection, "no trips match the selection");
        }

        let results = engine.run(&trips, &config.reports);
        print_reports(prompter.output(), &results)?;
        prompter.page_raw_rows(&trips, config.page_size)?;

        if !prompter.confirm("\nWould you like to restart? Enter yes or no.\n")? {
            return Ok(());
        }
    }
}

fn print_reports(out: &mut impl Write, results: &[TimedReport]) -> io::Result<()> {
    for timed in results {
        writeln!(out, "\nCalculating {}...\n", timed.report.kind().title())?;
        write!(out, "{}", timed.report)?;
        writeln!(out, "\nThis took {:.6} seconds.", timed.elapsed.as_secs_f64())?;
        writeln!(out, "{SEPARATOR}")?;
    }
    out.flush()
}

fn print_json(
    out: &mut impl Write,
    selection: &FilterSelection,
    trips: &DataSet,
    results: &[TimedReport],
) -> Result<()> {
    let doc = serde_json::json!({
        "selection": {
            "city": selection.city,
            "month": selection.month.to_string(),
            "day": selection.day.to_string(),
        },
        "rows": trips.row_count(),
        "reports": results,
    });
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}
