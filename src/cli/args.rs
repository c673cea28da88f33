use crate::core::analytics::DEFAULT_LOW_PERFORMER_THRESHOLD;
use crate::core::enricher::DEFAULT_CATALOG_LIMIT;
use crate::core::validator::FilterCriteria;
use crate::io::catalog_client::{DEFAULT_CATALOG_URL, DEFAULT_TIMEOUT_SECS};
use crate::io::report::DEFAULT_REPORT_PATH;
use crate::io::snapshot::DEFAULT_SNAPSHOT_PATH;
use crate::pipeline::{PipelineConfig, DEFAULT_INPUT_PATH};
use crate::types::AnalyticsError;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// Analyse a pipe-delimited sales log and write an analytics report
#[derive(Parser, Debug)]
#[command(name = "sales-analytics")]
#[command(about = "Analyse a pipe-delimited sales log and write an analytics report", long_about = None)]
pub struct CliArgs {
    /// Input sales log
    #[arg(
        long = "input",
        value_name = "PATH",
        default_value = DEFAULT_INPUT_PATH,
        help = "Path to the pipe-delimited sales log"
    )]
    pub input: PathBuf,

    /// Report output path
    #[arg(
        long = "output",
        value_name = "PATH",
        default_value = DEFAULT_REPORT_PATH,
        help = "Where to write the text report"
    )]
    pub output: PathBuf,

    /// Enriched snapshot output path
    #[arg(
        long = "enriched",
        value_name = "PATH",
        default_value = DEFAULT_SNAPSHOT_PATH,
        help = "Where to write the enriched pipe-delimited snapshot"
    )]
    pub enriched: PathBuf,

    /// Catalog service endpoint
    #[arg(
        long = "catalog-url",
        value_name = "URL",
        default_value = DEFAULT_CATALOG_URL,
        help = "Product catalog endpoint (queried with ?limit=N)"
    )]
    pub catalog_url: String,

    /// Maximum number of catalog entries to fetch
    #[arg(
        long = "catalog-limit",
        value_name = "COUNT",
        default_value_t = DEFAULT_CATALOG_LIMIT,
        help = "Maximum number of catalog entries to fetch"
    )]
    pub catalog_limit: usize,

    /// Catalog request timeout
    #[arg(
        long = "timeout-secs",
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "Catalog request timeout in seconds"
    )]
    pub timeout_secs: u64,

    /// Keep only transactions from this region (exact match)
    #[arg(long = "region", value_name = "REGION")]
    pub region: Option<String>,

    /// Keep only transactions with amount >= this value
    #[arg(long = "min-amount", value_name = "AMOUNT")]
    pub min_amount: Option<Decimal>,

    /// Keep only transactions with amount <= this value
    #[arg(long = "max-amount", value_name = "AMOUNT")]
    pub max_amount: Option<Decimal>,

    /// Quantity below which a product is reported as a low performer
    #[arg(
        long = "low-threshold",
        value_name = "QUANTITY",
        default_value_t = DEFAULT_LOW_PERFORMER_THRESHOLD
    )]
    pub low_threshold: i64,

    /// Diagnostic log level (logs go to stderr)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

/// Log levels accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl CliArgs {
    /// Build a PipelineConfig from CLI arguments
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when both amount bounds are given and the
    /// minimum exceeds the maximum.
    ///
    /// An empty `--region` means no region filter.
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig, AnalyticsError> {
        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount) {
            if min > max {
                return Err(AnalyticsError::invalid_config(format!(
                    "--min-amount {} is greater than --max-amount {}",
                    min, max
                )));
            }
        }

        Ok(PipelineConfig {
            input_path: self.input.clone(),
            report_path: self.output.clone(),
            snapshot_path: self.enriched.clone(),
            filters: FilterCriteria {
                region: self.region.clone().filter(|region| !region.is_empty()),
                min_amount: self.min_amount,
                max_amount: self.max_amount,
            },
            catalog_limit: self.catalog_limit,
            low_threshold: self.low_threshold,
        })
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
