//! I/O module
//!
//! Handles everything that touches bytes: the sales log, the catalog service
//! and the two output files.
//!
//! # Components
//!
//! - `sales_reader` - Reads the sales log with encoding fallback
//! - `line_format` - Parses pipe-delimited lines into transactions
//! - `catalog_client` - Blocking HTTP client for the product catalog
//! - `snapshot` - Enriched pipe-delimited snapshot output
//! - `report` - Text report assembly and formatting

pub mod catalog_client;
pub mod line_format;
pub mod report;
pub mod sales_reader;
pub mod snapshot;

pub use catalog_client::HttpCatalogClient;
pub use line_format::{parse_line, parse_transactions, ParseOutcome};
pub use report::{write_report, SalesReport};
pub use sales_reader::{read_sales_data, TextEncoding};
pub use snapshot::{save_enriched_snapshot, write_enriched_snapshot};
