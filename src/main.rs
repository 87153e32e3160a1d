use analytics::{IntervalCalculator, IntervalReport, ProducerIntervals};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use configuration::{ConfigError, Settings};
use core_types::ProducerInterval;
use std::path::PathBuf;

/// The main entry point for the Razzie producer-interval service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RAZZIE__* overrides may live in a .env file. Its absence is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Intervals(args) => handle_intervals(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Golden Raspberry Awards producer interval service.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the movie list and serve the HTTP API.
    Serve(ServeArgs),
    /// Print producer win intervals for a CSV file and exit.
    Intervals(IntervalsArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,

    /// Overrides `data.csv_path` (a CSV file or a directory of CSV files).
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Parser)]
struct IntervalsArgs {
    /// The CSV file or directory to read.
    #[arg(long)]
    csv: PathBuf,

    /// Print every interval of every repeat winner instead of only the extremes.
    #[arg(long)]
    all: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(args)?;

    let _log_guard = configuration::init_tracing(&settings.logging)?;
    tracing::info!(
        host = %settings.server.host,
        port = settings.server.port,
        csv = %settings.data.csv_path.display(),
        "Starting Razzie API."
    );

    web_server::run_server(settings).await
}

/// Loads the file and environment, applies the flags, then validates once.
fn resolve_settings(args: ServeArgs) -> Result<Settings, ConfigError> {
    let mut settings = configuration::load_unvalidated_from(&args.config)?;
    apply_overrides(&mut settings, args);
    settings.validate()?;
    Ok(settings)
}

/// Command-line flags win over the file and the environment.
fn apply_overrides(settings: &mut Settings, args: ServeArgs) {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(csv) = args.csv {
        settings.data.csv_path = csv;
    }
}

fn handle_intervals(args: IntervalsArgs) -> anyhow::Result<()> {
    let movies = loader::load_movies(&args.csv)?;
    let calculator = IntervalCalculator::new();

    if args.all {
        let all = calculator.compute_all_intervals(&movies);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&all)?);
        } else {
            print_all_intervals(&all);
        }
    } else {
        let report = calculator.compute_extremal_intervals(&movies);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
    }
    Ok(())
}

// ==============================================================================
// Output
// ==============================================================================

fn interval_table<'a>(rows: impl IntoIterator<Item = &'a ProducerInterval>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Producer", "Interval", "Previous Win", "Following Win"]);
    for interval in rows {
        table.add_row(vec![
            Cell::new(interval.producer().name()),
            Cell::new(interval.gap()),
            Cell::new(interval.previous_win()),
            Cell::new(interval.following_win()),
        ]);
    }
    table
}

fn print_report(report: &IntervalReport) {
    if report.is_empty() {
        println!("No producer has won more than once.");
        return;
    }
    println!("Shortest interval between wins:");
    println!("{}", interval_table(&report.min));
    println!("Longest interval between wins:");
    println!("{}", interval_table(&report.max));
}

fn print_all_intervals(all: &ProducerIntervals) {
    if all.is_empty() {
        println!("No producer has won more than once.");
        return;
    }
    println!("{}", interval_table(all.values().flatten()));
}
