//! Product catalog types used for enrichment
//!
//! - [`CatalogProduct`] / [`CatalogResponse`]: wire format of the catalog service
//! - [`CatalogIndex`]: read-only lookup from numeric product ID to [`CatalogEntry`]
//! - [`CatalogMatch`] / [`EnrichedTransaction`]: per-record enrichment outcome

use super::transaction::Transaction;
use serde::Deserialize;
use std::collections::HashMap;

const UNKNOWN: &str = "Unknown";

/// Product as returned by the catalog service
///
/// Only the fields used for enrichment are deserialized. Missing or null text
/// fields fall back to `"Unknown"` and a missing rating to `0.0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogProduct {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Top-level catalog payload: `{ "products": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

/// Catalog metadata attached to a matched transaction
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub title: String,
    pub category: String,
    pub brand: String,
    pub rating: f64,
}

impl From<CatalogProduct> for CatalogEntry {
    fn from(product: CatalogProduct) -> Self {
        CatalogEntry {
            title: product.title.unwrap_or_else(|| UNKNOWN.to_string()),
            category: product.category.unwrap_or_else(|| UNKNOWN.to_string()),
            brand: product.brand.unwrap_or_else(|| UNKNOWN.to_string()),
            rating: product.rating.unwrap_or(0.0),
        }
    }
}

/// Lookup from numeric product ID to catalog metadata
///
/// Built once per run and never modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: HashMap<u64, CatalogEntry>,
}

impl CatalogIndex {
    /// Create an empty index (matches nothing)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from catalog products
    ///
    /// When the same ID appears more than once, the last occurrence wins.
    pub fn from_products(products: Vec<CatalogProduct>) -> Self {
        let entries = products
            .into_iter()
            .map(|product| (product.id, CatalogEntry::from(product)))
            .collect();

        CatalogIndex { entries }
    }

    pub fn get(&self, id: u64) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of looking a transaction's product up in the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogMatch {
    Matched(CatalogEntry),
    Unmatched,
}

/// A transaction paired with its catalog lookup outcome
///
/// The wrapped transaction is never modified by enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTransaction {
    pub transaction: Transaction,
    pub catalog: CatalogMatch,
}

impl EnrichedTransaction {
    pub fn new(transaction: Transaction, catalog: CatalogMatch) -> Self {
        EnrichedTransaction {
            transaction,
            catalog,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self.catalog, CatalogMatch::Matched(_))
    }

    fn entry(&self) -> Option<&CatalogEntry> {
        match &self.catalog {
            CatalogMatch::Matched(entry) => Some(entry),
            CatalogMatch::Unmatched => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.entry().map(|entry| entry.category.as_str())
    }

    pub fn brand(&self) -> Option<&str> {
        self.entry().map(|entry| entry.brand.as_str())
    }

    pub fn rating(&self) -> Option<f64> {
        self.entry().map(|entry| entry.rating)
    }
}
