//! Core traits at the pipeline's external seams
//!
//! The catalog used for enrichment comes from a remote service in production
//! and from fixed data in tests; both sit behind [`CatalogSource`].

use crate::types::{AnalyticsError, CatalogProduct};

/// Trait for retrieving product catalog entries
///
/// Implementations perform at most one blocking fetch per call and must not
/// retry. Failures are reported as errors; recovering from them (by falling
/// back to an empty catalog) is the caller's job.
pub trait CatalogSource {
    /// Fetch up to `limit` catalog products
    fn fetch_products(&self, limit: usize) -> Result<Vec<CatalogProduct>, AnalyticsError>;
}

/// Catalog source backed by an in-memory product list
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<CatalogProduct>,
}

impl StaticCatalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        StaticCatalog { products }
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch_products(&self, limit: usize) -> Result<Vec<CatalogProduct>, AnalyticsError> {
        Ok(self.products.iter().take(limit).cloned().collect())
    }
}

/// Catalog source that always fails, as an unreachable service would
#[derive(Debug, Clone)]
pub struct UnavailableCatalog {
    pub reason: String,
}

impl CatalogSource for UnavailableCatalog {
    fn fetch_products(&self, _limit: usize) -> Result<Vec<CatalogProduct>, AnalyticsError> {
        Err(AnalyticsError::network_error(self.reason.clone()))
    }
}
