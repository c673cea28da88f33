//! End-to-end sales analytics pipeline
//!
//! This module orchestrates one sequential pass over the sales log:
//! read → parse → validate/filter → analyse → fetch catalog → enrich →
//! save snapshot → report.
//!
//! # Design
//!
//! [`SalesPipeline`] focuses on orchestration, delegating:
//! - Reading and decoding to `io::sales_reader`
//! - Line parsing to `io::line_format`
//! - Validation and filters to `core::validator`
//! - Aggregations to `core::analytics` (through `io::report::SalesReport`)
//! - Catalog lookups to `core::enricher` and a [`CatalogSource`]
//! - Output to `io::snapshot` and `io::report`
//!
//! Numbered progress lines are written to the supplied writer (stdout in the
//! binary); diagnostics go through `tracing`.

use crate::core::analytics::DEFAULT_LOW_PERFORMER_THRESHOLD;
use crate::core::enricher::{
    build_catalog_index, enrich_transactions, EnrichmentSummary, DEFAULT_CATALOG_LIMIT,
};
use crate::core::traits::CatalogSource;
use crate::core::validator::{validate_and_filter, FilterCriteria, ValidationSummary};
use crate::io::line_format::parse_transactions;
use crate::io::report::{format_percent, write_report, SalesReport, DEFAULT_REPORT_PATH};
use crate::io::sales_reader::read_sales_data;
use crate::io::snapshot::{save_enriched_snapshot, DEFAULT_SNAPSHOT_PATH};
use crate::types::AnalyticsError;
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};

/// Default location of the sales log
pub const DEFAULT_INPUT_PATH: &str = "data/sales_data.txt";

const TOTAL_STEPS: usize = 10;

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub report_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub filters: FilterCriteria,
    pub catalog_limit: usize,
    pub low_threshold: i64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            filters: FilterCriteria::default(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            low_threshold: DEFAULT_LOW_PERFORMER_THRESHOLD,
        }
    }
}

/// Counts gathered over a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub lines_read: usize,
    pub parsed: usize,
    pub skipped_lines: usize,
    pub validation: ValidationSummary,
    pub enrichment: EnrichmentSummary,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The input was missing, unreadable or empty; nothing was written
    NoData,
    Completed(PipelineSummary),
}

/// Sequential sales analytics pipeline
#[derive(Debug, Clone, Default)]
pub struct SalesPipeline {
    config: PipelineConfig,
}

struct Progress<'a> {
    out: &'a mut dyn Write,
}

impl Progress<'_> {
    fn step(&mut self, n: usize, message: &str) -> Result<(), AnalyticsError> {
        writeln!(self.out, "[{}/{}] {}", n, TOTAL_STEPS, message)?;
        Ok(())
    }

    fn done(&mut self, message: &str) -> Result<(), AnalyticsError> {
        writeln!(self.out, "✓ {}", message)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn line(&mut self, message: &str) -> Result<(), AnalyticsError> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }
}

impl SalesPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        SalesPipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the whole pipeline once
    ///
    /// # Arguments
    ///
    /// * `catalog` - Source of catalog products for enrichment
    /// * `progress` - Writer receiving the numbered progress lines
    ///
    /// # Returns
    ///
    /// * `Ok(PipelineOutcome::NoData)` - The input yielded no data lines
    /// * `Ok(PipelineOutcome::Completed(_))` - Snapshot and report were written
    /// * `Err(AnalyticsError)` - An output file or the progress writer failed
    ///
    /// Read failures, malformed lines and catalog failures are recovered
    /// internally and never returned.
    pub fn run(
        &self,
        catalog: &dyn CatalogSource,
        progress: &mut dyn Write,
    ) -> Result<PipelineOutcome, AnalyticsError> {
        let mut progress = Progress { out: progress };
        let config = &self.config;

        progress.step(1, "Reading sales data...")?;
        let lines = match read_sales_data(&config.input_path) {
            Ok(lines) => lines,
            Err(e) => {
                error!("Error reading sales data: {}", e);
                Vec::new()
            }
        };
        if lines.is_empty() {
            progress.line("No data found. Exiting.")?;
            return Ok(PipelineOutcome::NoData);
        }
        progress.done(&format!("Successfully read {} transactions", lines.len()))?;

        progress.step(2, "Parsing and cleaning data...")?;
        let parsed = parse_transactions(&lines);
        progress.done(&format!("Parsed {} records", parsed.transactions.len()))?;

        progress.step(3, "Data profile:")?;
        let outcome = validate_and_filter(&parsed.transactions, &config.filters);
        progress.line(&format!(
            "Available Regions: {}",
            outcome.profile.regions.iter().cloned().collect::<Vec<_>>().join(", ")
        ))?;
        if let Some((min, max)) = outcome.profile.amount_range {
            progress.line(&format!("Transaction Amount Range: {} - {}", min, max))?;
        }
        if let Some(region) = &config.filters.region {
            progress.line(&format!(
                "Records after region filter ({}): {}",
                region, outcome.summary.after_region
            ))?;
        }
        if outcome.summary.amount_filter_applied {
            progress.line(&format!(
                "Records after amount filter: {}",
                outcome.summary.after_amount
            ))?;
        }
        progress.line("")?;

        progress.step(4, "Validating transactions...")?;
        progress.done(&format!(
            "Valid: {} | Invalid: {}",
            outcome.valid.len(),
            outcome.invalid_count
        ))?;

        progress.step(5, "Analyzing sales data...")?;
        progress.done("Analysis complete")?;

        progress.step(6, "Fetching product data from API...")?;
        let index = build_catalog_index(catalog, config.catalog_limit);
        progress.done(&format!("Catalog entries available: {}", index.len()))?;

        progress.step(7, "Enriching sales data...")?;
        let enriched = enrich_transactions(&outcome.valid, &index);
        let enrichment = EnrichmentSummary::from_enriched(&enriched);
        progress.done(&format!(
            "Enriched {}/{} transactions ({}%)",
            enrichment.matched,
            enrichment.total,
            format_percent(enrichment.success_rate, 1)
        ))?;

        progress.step(8, "Saving enriched data...")?;
        save_enriched_snapshot(&enriched, &config.snapshot_path)?;
        progress.done(&format!("Saved to: {}", config.snapshot_path.display()))?;

        progress.step(9, "Generating report...")?;
        let report = SalesReport::build(
            &outcome.valid,
            &enriched,
            config.low_threshold,
            Local::now().naive_local(),
        );
        write_report(&report, &config.report_path)?;
        progress.done(&format!("Report saved to: {}", config.report_path.display()))?;

        progress.step(10, "Process Complete!")?;
        progress.line(&"=".repeat(50))?;

        let summary = PipelineSummary {
            lines_read: lines.len(),
            parsed: parsed.transactions.len(),
            skipped_lines: parsed.skipped_field_count + parsed.malformed.len(),
            validation: outcome.summary,
            enrichment,
        };
        info!(?summary, "pipeline complete");

        Ok(PipelineOutcome::Completed(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{StaticCatalog, UnavailableCatalog};
    use crate::types::CatalogProduct;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::TempDir;

    const SALES: &str = "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region\n\
        T1|2024-01-01|P1|Widget|5|2.50|C1|North\n\
        T2|2024-01-01|P20|Gadget|0|10.00|C2|South\n\
        T3|2024-01-02|P2|Gizmo|3|4.00|C3|South\n\
        T4|2024-01-02|P2|Gizmo\n";

    fn config_in(dir: &TempDir, sales: Option<&str>) -> PipelineConfig {
        let input_path = dir.path().join("data").join("sales_data.txt");
        if let Some(content) = sales {
            fs::create_dir_all(input_path.parent().unwrap()).unwrap();
            fs::write(&input_path, content).unwrap();
        }

        PipelineConfig {
            input_path,
            report_path: dir.path().join("output").join("report-data"),
            snapshot_path: dir.path().join("data").join("enriched_sales_data.txt"),
            ..PipelineConfig::default()
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(vec![CatalogProduct {
            id: 1,
            title: Some("Widget Pro".to_string()),
            category: Some("tools".to_string()),
            brand: Some("Acme".to_string()),
            rating: Some(4.5),
        }])
    }

    #[test]
    fn test_default_config_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_path, PathBuf::from("data/sales_data.txt"));
        assert_eq!(config.report_path, PathBuf::from("output/report-data"));
        assert_eq!(config.snapshot_path, PathBuf::from("data/enriched_sales_data.txt"));
        assert_eq!(config.catalog_limit, 100);
        assert_eq!(config.low_threshold, 10);
    }

    #[test]
    fn test_run_completes_and_writes_outputs() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, Some(SALES));
        let pipeline = SalesPipeline::new(config.clone());
        let mut progress = Vec::new();

        let outcome = pipeline.run(&catalog(), &mut progress).unwrap();

        let summary = match outcome {
            PipelineOutcome::Completed(summary) => summary,
            PipelineOutcome::NoData => panic!("expected a completed run"),
        };
        assert_eq!(summary.lines_read, 4);
        assert_eq!(summary.parsed, 3);
        assert_eq!(summary.skipped_lines, 1);
        assert_eq!(summary.validation.invalid, 1);
        assert_eq!(summary.validation.final_count, 2);
        assert_eq!(summary.enrichment.matched, 1);
        assert_eq!(summary.enrichment.success_rate, dec!(50));

        let snapshot = fs::read_to_string(&config.snapshot_path).unwrap();
        assert_eq!(snapshot.lines().count(), 3);
        assert!(snapshot.contains("T1|2024-01-01|P1|Widget|5|2.50|C1|North|tools|Acme|4.5|true"));

        let report = fs::read_to_string(&config.report_path).unwrap();
        assert!(report.contains("Records Processed: 2"));

        let progress = String::from_utf8(progress).unwrap();
        for step in 1..=10 {
            assert!(progress.contains(&format!("[{}/10]", step)), "missing step {}", step);
        }
        assert!(progress.contains("Valid: 2 | Invalid: 1"));
        assert!(progress.contains("Enriched 1/2 transactions (50.0%)"));
    }

    #[test]
    fn test_progress_rounds_recurring_match_rate() {
        let dir = TempDir::new().unwrap();
        let sales = "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region\n\
            T1|2024-01-01|P1|Widget|1|2.00|C1|North\n\
            T2|2024-01-01|P1|Widget|1|2.00|C2|North\n\
            T3|2024-01-02|P7|Gizmo|1|2.00|C3|South\n";
        let config = config_in(&dir, Some(sales));
        let mut progress = Vec::new();

        SalesPipeline::new(config.clone())
            .run(&catalog(), &mut progress)
            .unwrap();

        let progress = String::from_utf8(progress).unwrap();
        assert!(progress.contains("Enriched 2/3 transactions (66.7%)"));
        let report = fs::read_to_string(&config.report_path).unwrap();
        assert!(report.contains("Success Rate: 66.7%"));
    }

    #[test]
    fn test_missing_input_is_no_data() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, None);
        let pipeline = SalesPipeline::new(config.clone());
        let mut progress = Vec::new();

        let outcome = pipeline.run(&catalog(), &mut progress).unwrap();

        assert_eq!(outcome, PipelineOutcome::NoData);
        assert!(!config.report_path.exists());
        assert!(!config.snapshot_path.exists());
        assert!(String::from_utf8(progress).unwrap().contains("No data found. Exiting."));
    }

    #[test]
    fn test_header_only_input_is_no_data() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, Some("TransactionID|Date\n\n"));
        let outcome = SalesPipeline::new(config)
            .run(&catalog(), &mut std::io::sink())
            .unwrap();
        assert_eq!(outcome, PipelineOutcome::NoData);
    }

    #[test]
    fn test_catalog_failure_does_not_abort() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, Some(SALES));
        let source = UnavailableCatalog {
            reason: "connection refused".to_string(),
        };

        let outcome = SalesPipeline::new(config.clone())
            .run(&source, &mut std::io::sink())
            .unwrap();

        match outcome {
            PipelineOutcome::Completed(summary) => {
                assert_eq!(summary.enrichment.matched, 0);
                assert_eq!(summary.enrichment.success_rate, dec!(0));
            }
            PipelineOutcome::NoData => panic!("expected a completed run"),
        }
        let report = fs::read_to_string(&config.report_path).unwrap();
        assert!(report.contains("Success Rate: 0.0%"));
    }

    #[test]
    fn test_filters_are_applied() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, Some(SALES));
        config.filters.region = Some("South".to_string());

        let mut progress = Vec::new();
        let outcome = SalesPipeline::new(config)
            .run(&catalog(), &mut progress)
            .unwrap();

        match outcome {
            PipelineOutcome::Completed(summary) => {
                assert!(summary.validation.region_filter_applied);
                assert_eq!(summary.validation.after_region, 1);
                assert_eq!(summary.validation.final_count, 1);
            }
            PipelineOutcome::NoData => panic!("expected a completed run"),
        }
        assert!(String::from_utf8(progress)
            .unwrap()
            .contains("Records after region filter (South): 1"));
    }
}
