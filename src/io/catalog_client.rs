//! HTTP client for the external product catalog
//!
//! Issues a single blocking `GET {base_url}?limit={n}` and expects a JSON body
//! of the form `{ "products": [ {id, title, category, brand, rating}, ... ] }`.
//! Transport errors, timeouts, non-2xx statuses and undecodable bodies are all
//! reported as [`AnalyticsError::NetworkError`]; there is no retry.

use crate::core::traits::CatalogSource;
use crate::types::{AnalyticsError, CatalogProduct, CatalogResponse};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Default catalog endpoint
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Blocking catalog client
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Build a client for `base_url` with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the underlying HTTP client cannot be constructed
    /// (for example, TLS backend initialisation failure).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AnalyticsError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self::with_client(base_url, client))
    }

    /// Build from an existing client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        HttpCatalogClient {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl CatalogSource for HttpCatalogClient {
    fn fetch_products(&self, limit: usize) -> Result<Vec<CatalogProduct>, AnalyticsError> {
        debug!(url = %self.base_url, limit, "requesting catalog");

        let response: CatalogResponse = self
            .client
            .get(&self.base_url)
            .query(&[("limit", limit)])
            .send()?
            .error_for_status()?
            .json()?;

        let mut products = response.products;
        products.truncate(limit);
        info!(count = products.len(), "fetched catalog products");

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_service_is_network_error() {
        // Port 9 on loopback (discard) is not expected to serve HTTP
        let client = HttpCatalogClient::new("http://127.0.0.1:9/products", Duration::from_millis(500))
            .unwrap();

        let result = client.fetch_products(100);
        assert!(matches!(result, Err(AnalyticsError::NetworkError { .. })));
    }

    #[test]
    fn test_base_url_is_kept() {
        let client = HttpCatalogClient::new(DEFAULT_CATALOG_URL, Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), DEFAULT_CATALOG_URL);
    }
}
