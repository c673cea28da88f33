//! Catalog enrichment
//!
//! Attaches catalog metadata (category, brand, rating) to transactions by
//! product ID. Enrichment never fails: a catalog that cannot be fetched becomes
//! an empty index, and a product ID that cannot be resolved becomes an
//! unmatched record.
//!
//! # Product ID Mapping
//!
//! `P101` maps to catalog ID `101`. IDs without the `P` prefix, with a
//! non-numeric suffix, or whose number is absent from the catalog are unmatched.

use crate::core::traits::CatalogSource;
use crate::types::{CatalogIndex, CatalogMatch, EnrichedTransaction, Transaction};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Maximum number of catalog entries requested by default
pub const DEFAULT_CATALOG_LIMIT: usize = 100;

/// Build the catalog index from `source`
///
/// Any fetch failure is logged and yields an empty index, so the pipeline
/// always continues.
pub fn build_catalog_index(source: &dyn CatalogSource, limit: usize) -> CatalogIndex {
    match source.fetch_products(limit) {
        Ok(products) => {
            let index = CatalogIndex::from_products(products);
            info!(entries = index.len(), "built catalog index");
            index
        }
        Err(e) => {
            warn!("Failed to fetch products, enrichment will match nothing: {}", e);
            CatalogIndex::empty()
        }
    }
}

/// Resolve a product ID against the catalog
///
/// Total function: every input produces either `Matched` or `Unmatched`.
pub fn classify(product_id: &str, index: &CatalogIndex) -> CatalogMatch {
    let entry = product_id
        .strip_prefix('P')
        .and_then(|suffix| suffix.parse::<u64>().ok())
        .and_then(|id| index.get(id));

    match entry {
        Some(entry) => CatalogMatch::Matched(entry.clone()),
        None => CatalogMatch::Unmatched,
    }
}

/// Enrich every transaction against `index`, preserving input order
pub fn enrich_transactions(
    transactions: &[Transaction],
    index: &CatalogIndex,
) -> Vec<EnrichedTransaction> {
    transactions
        .iter()
        .map(|tx| {
            let catalog = classify(tx.product_id(), index);
            if catalog == CatalogMatch::Unmatched {
                debug!(product_id = tx.product_id(), "no catalog match");
            }
            EnrichedTransaction::new(tx.clone(), catalog)
        })
        .collect()
}

/// Match-rate statistics over a set of enriched transactions
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentSummary {
    pub matched: usize,
    pub total: usize,
    /// Percentage of matched records, 0 when there are none
    pub success_rate: Decimal,
    /// Distinct names of products that could not be enriched
    pub unmatched_products: BTreeSet<String>,
}

impl EnrichmentSummary {
    pub fn from_enriched(enriched: &[EnrichedTransaction]) -> Self {
        let matched = enriched.iter().filter(|e| e.is_match()).count();
        let total = enriched.len();

        let success_rate = if total == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(matched) * Decimal::ONE_HUNDRED / Decimal::from(total)
        };

        let unmatched_products = enriched
            .iter()
            .filter(|e| !e.is_match())
            .map(|e| e.transaction.product_name().to_string())
            .collect();

        EnrichmentSummary {
            matched,
            total,
            success_rate,
            unmatched_products,
        }
    }
}
