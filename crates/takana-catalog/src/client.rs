//! HTTP client for the backend's product catalog endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use takana_core::Product;

use crate::error::CatalogError;
use crate::normalize::normalize_catalog;
use crate::types::RawProduct;

/// Path of the catalog endpoint, appended to the configured base URL.
pub const PRODUCTS_PATH: &str = "/api/products";

/// Anything that can produce a full catalog in one call.
///
/// [`crate::CatalogCache`] is generic over this so cache and state-machine
/// behavior can be exercised without a network.
pub trait CatalogSource {
    /// Fetches the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog could not be obtained.
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// Fetches the catalog from `GET {base_url}/api/products`.
///
/// Non-2xx responses and bodies that are not a JSON array of objects are
/// typed errors. Individual records missing a name or price are dropped.
/// There are no retries; the only retry path is a user-initiated refresh.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with a whole-request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The backend base URL image paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the catalog endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the result does not parse
    /// as an absolute URL.
    fn products_url(&self) -> Result<String, CatalogError> {
        let raw = format!("{}{PRODUCTS_PATH}", self.base_url);
        let url = reqwest::Url::parse(&raw).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(url.to_string())
    }

    /// Performs one catalog fetch.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBaseUrl`]: the base URL is not usable.
    /// - [`CatalogError::Http`]: connection failure or timeout.
    /// - [`CatalogError::UnexpectedStatus`]: any non-2xx status.
    /// - [`CatalogError::Deserialize`]: the body is not a JSON array of objects.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.products_url()?;

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let raw = serde_json::from_str::<Vec<RawProduct>>(&body).map_err(|e| {
            CatalogError::Deserialize {
                context: format!("catalog from {url}"),
                source: e,
            }
        })?;

        let (products, skipped) = normalize_catalog(raw);
        tracing::info!(
            url = %url,
            products = products.len(),
            skipped,
            "catalog fetched"
        );
        Ok(products)
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetch_products().await
    }
}
