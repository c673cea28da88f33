//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: the parsed sales record
//! - `catalog`: catalog wire types, the lookup index and enrichment outcomes
//! - `error`: Error types for the analytics pipeline

pub mod catalog;
pub mod error;
pub mod transaction;

pub use catalog::{
    CatalogEntry, CatalogIndex, CatalogMatch, CatalogProduct, CatalogResponse,
    EnrichedTransaction,
};
pub use error::AnalyticsError;
pub use transaction::Transaction;
