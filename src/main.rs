//! eis-scraper main entry point
//!
//! Command-line interface for the procurement portal scraper.

use clap::Parser;
use eis_scraper::config::{load_config, StorageBackend};
use eis_scraper::records::PageType;
use eis_scraper::scrape::run_scrape;
use eis_scraper::search::{DateRange, SearchQuery};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Scraper for a government procurement portal
///
/// Builds search URLs for a date range and page type, fetches result
/// pages, and appends parsed records to the configured storage backend.
#[derive(Parser, Debug)]
#[command(name = "eis-scraper")]
#[command(version = "0.1.0")]
#[command(about = "Procurement portal scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the search surface without fetching
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show row counts from the SQLite database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_run(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("eis_scraper=info,warn"),
            1 => EnvFilter::new("eis_scraper=debug,info"),
            2 => EnvFilter::new("eis_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the search surface
fn handle_dry_run(config: &eis_scraper::Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== eis-scraper Dry Run ===\n");

    let scraper = &config.scraper;
    println!("Scraper Configuration:");
    println!("  Base URL: {}", scraper.base_url);
    println!("  Page type: {}", scraper.page_type);
    println!("  Date range: {} .. {}", scraper.date_from, scraper.date_to);
    println!("  Max result pages per query: {}", scraper.max_result_pages);
    println!("  Records per page: {}", scraper.records_per_page);
    println!("  Request delay: {}ms", scraper.request_delay_ms);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.name);
    println!("  Version: {}", config.user_agent.version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nStorage:");
    match config.storage.backend {
        StorageBackend::Memory => {
            println!("  Backend: memory");
            if let Some(dir) = &config.storage.csv_dir {
                println!("  CSV export: {dir}");
            }
        }
        StorageBackend::Sqlite => {
            println!("  Backend: sqlite");
            if let Some(path) = &config.storage.database_path {
                println!("  Database: {path}");
            }
        }
    }

    // Show the first query URL the run would issue
    let base = url::Url::parse(&scraper.base_url)?;
    let query = SearchQuery {
        page_type: scraper.page_type,
        range: DateRange::new(scraper.date_from, scraper.date_to),
        page_number: 1,
    };
    println!("\nFirst query URL:");
    println!("  {}", query.url(&base, scraper.records_per_page)?);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --stats mode: shows row counts from the database
fn handle_stats(config: &eis_scraper::Config) -> Result<(), Box<dyn std::error::Error>> {
    use eis_scraper::storage::SqliteStorage;
    use std::path::Path;

    let Some(path) = &config.storage.database_path else {
        return Err("stats requires the sqlite backend with database-path set".into());
    };

    println!("Database: {path}\n");
    let storage = SqliteStorage::open_read_only(Path::new(path))?;

    for page_type in [PageType::Auction, PageType::Contract, PageType::Organization] {
        let count = storage.count(page_type)?;
        println!("{:>14}: {count} row(s)", page_type.table_name());
    }

    Ok(())
}

/// Handles the main scrape operation
async fn handle_run(config: eis_scraper::Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Scraping {} listings from {} to {}",
        config.scraper.page_type,
        config.scraper.date_from,
        config.scraper.date_to
    );

    match run_scrape(config).await {
        Ok(report) => {
            println!(
                "Done: {} slice(s), {} page(s) fetched, {} skipped, {} record(s) written",
                report.slices,
                report.pages_fetched,
                report.pages_skipped,
                report.records_written
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
