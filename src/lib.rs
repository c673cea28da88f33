//! Sales Analytics Library
//! # Overview
//!
//! This library turns a pipe-delimited sales log into an analytics report in
//! one sequential pass, enriching valid transactions with data from a remote
//! product catalog along the way.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, catalog records, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::validator`] - Validity rules and optional filters
//!   - [`core::analytics`] - Aggregations over valid transactions
//!   - [`core::enricher`] - Catalog lookup and enrichment
//! - [`io`] - Sales log reading, catalog HTTP client, snapshot and report output
//! - [`pipeline`] - Orchestration of the ten pipeline steps
//!
//! # Transaction Line Format
//!
//! ```text
//! TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region
//! T001|2024-12-01|P101|Laptop|2|45,000|C001|North
//! ```
//!
//! The first line is a header. Commas are thousands separators in numeric
//! fields and are dropped from product names.
//!
//! # Validity
//!
//! A transaction is kept only when quantity and unit price are positive,
//! the IDs carry their `T`/`P`/`C` prefixes and the region is present.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::core::{CatalogSource, FilterCriteria, StaticCatalog, UnavailableCatalog};
pub use io::HttpCatalogClient;
pub use pipeline::{PipelineConfig, PipelineOutcome, PipelineSummary, SalesPipeline};
pub use types::{AnalyticsError, CatalogProduct, EnrichedTransaction, Transaction};
