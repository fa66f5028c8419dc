use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use cowtrack::analyzer::{FleetAnalyzer, RunOptions};
use cowtrack::logging::init_logging;

#[derive(Parser)]
#[command(name = "cowtrack")]
#[command(about = "Fast Rust implementation for COW fleet movement analytics")]
#[command(version = "1.0.0")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Limit ranked output to N entries
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Location directory file (CSV or JSON), overrides config
    #[arg(long, global = true)]
    locations: Option<PathBuf>,

    /// Movement sheet file (CSV or JSON), overrides config
    #[arg(long, global = true)]
    movements: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show fleet-wide headline numbers
    Summary,
    /// Show per-COW aggregate metrics
    Cows {
        /// Show a single COW by ID
        #[arg(long)]
        cow: Option<String>,
    },
    /// Show per-warehouse metrics with idle accumulation
    Warehouses,
    /// Show per-region deployment metrics
    Regions,
    /// Show warehouse dwell-time rollups
    Dwell,
    /// Show off-air warehouse aging buckets
    Aging {
        /// Bucket raw idle days instead of months (recently-idled COWs)
        #[arg(long)]
        short: bool,
    },
    /// Show top events rollup
    Events,
    /// Show top vendors rollup
    Vendors,
    /// Show movement volume per location for the map overlay
    Map,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut options = RunOptions {
        json_output: cli.json,
        limit: cli.limit,
        cow: None,
        short: false,
        locations_file: cli.locations,
        movements_file: cli.movements,
    };

    let command = match cli.command.unwrap_or(Commands::Summary) {
        Commands::Summary => "summary",
        Commands::Cows { cow } => {
            options.cow = cow;
            "cows"
        }
        Commands::Warehouses => "warehouses",
        Commands::Regions => "regions",
        Commands::Dwell => "dwell",
        Commands::Aging { short } => {
            options.short = short;
            "aging"
        }
        Commands::Events => "events",
        Commands::Vendors => "vendors",
        Commands::Map => "map",
    };

    let json = options.json_output;
    let analyzer = FleetAnalyzer::new();
    match analyzer.run_command(command, options) {
        Ok(()) => Ok(()),
        Err(e) => handle_error(e, json),
    }
}

fn handle_error(e: anyhow::Error, json: bool) -> Result<()> {
    if json {
        println!("{{\"error\": \"{}\"}}", e);
    } else {
        eprintln!("Error: {}", e);
    }
    process::exit(1);
}
