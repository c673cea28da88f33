//! Sales Analytics CLI
//!
//! Command-line interface for analysing a pipe-delimited sales log.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --input data/sales_data.txt --output output/report-data
//! cargo run -- --region North --min-amount 1000 --log-level info
//! ```
//!
//! The program reads the sales log, validates and filters the transactions,
//! enriches them from the product catalog, writes an enriched snapshot and a
//! text report, and prints numbered progress lines to stdout. A failure
//! message is printed on stdout as well; diagnostics are logged to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success, including a run that found no data
//! - 1: Error (invalid configuration, unwritable output, etc.)

use sales_analytics::cli;
use sales_analytics::core::{CatalogSource, UnavailableCatalog};
use sales_analytics::io::HttpCatalogClient;
use sales_analytics::types::AnalyticsError;
use sales_analytics::SalesPipeline;
use std::io::Write;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing::warn;

fn run(args: &cli::CliArgs) -> Result<(), AnalyticsError> {
    let config = args.to_pipeline_config()?;

    // A client that cannot be built degrades to an empty catalog like any other
    // catalog failure.
    let catalog: Box<dyn CatalogSource> =
        match HttpCatalogClient::new(args.catalog_url.clone(), args.catalog_timeout()) {
            Ok(client) => Box::new(client),
            Err(e) => {
                warn!("Could not build catalog client: {}", e);
                Box::new(UnavailableCatalog {
                    reason: e.to_string(),
                })
            }
        };

    let stdout = std::io::stdout();
    let mut output = stdout.lock();
    writeln!(output, "{}", "=".repeat(50))?;
    writeln!(output, "SALES ANALYTICS SYSTEM")?;
    writeln!(output, "{}", "=".repeat(50))?;
    writeln!(output)?;

    SalesPipeline::new(config).run(catalog.as_ref(), &mut output)?;
    Ok(())
}

/// Print the generic failure message on the progress stream
fn write_failure(output: &mut dyn Write, error: &AnalyticsError) -> std::io::Result<()> {
    writeln!(output, "An error occurred: {}", error)?;
    writeln!(output, "Please check your data and try again.")?;
    output.flush()
}

fn main() {
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(args.log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        if write_failure(&mut std::io::stdout(), &e).is_err() {
            eprintln!("An error occurred: {}", e);
        }
        process::exit(1);
    }
}
