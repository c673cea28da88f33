//! Core business logic module
//!
//! This module contains the sales processing components:
//! - `traits` - The catalog source abstraction and in-process implementations
//! - `validator` - Validity rules and optional region/amount filters
//! - `analytics` - Revenue, region, product, customer and daily aggregations
//! - `enricher` - Catalog lookup and enrichment of valid transactions

pub mod analytics;
pub mod enricher;
pub mod traits;
pub mod validator;

pub use enricher::{build_catalog_index, enrich_transactions, EnrichmentSummary};
pub use traits::{CatalogSource, StaticCatalog, UnavailableCatalog};
pub use validator::{validate_and_filter, FilterCriteria, ValidationOutcome, ValidationSummary};
