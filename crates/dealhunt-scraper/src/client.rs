use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA};
use reqwest::Client;

use dealhunt_core::{DealRecord, VendorConfig};

use crate::error::ScraperError;
use crate::extract::parse_vendor_response;

/// Outcome of one fetch+extract cycle for a single vendor.
///
/// Never an `Err`: transport failures and bad statuses are folded into
/// `error` so one unreachable vendor cannot abort the aggregation. Consumed
/// immediately by the aggregator, never persisted.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub vendor: String,
    pub deals: Vec<DealRecord>,
    pub error: Option<String>,
    /// The URL that was attempted, for the failure descriptor.
    pub url: String,
}

/// HTTP client for vendor listing pages.
///
/// Sends a fixed set of polite-scraping headers (identifying user agent,
/// HTML accept headers, cache busting) and applies a bounded per-request
/// timeout. The upstream design had no timeout; a hung storefront would
/// have stalled the whole aggregation, so the bound here is a deliberate
/// hardening addition.
pub struct VendorClient {
    client: Client,
}

impl VendorClient {
    /// Creates a `VendorClient` with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g. invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one vendor's listing page and extracts its deal records.
    ///
    /// An empty `query` fetches the vendor's clearance listing; otherwise
    /// the escaped query is substituted into the vendor's search template.
    /// Transport failures and non-success statuses come back as a
    /// [`FetchResult`] with an empty deal list and a populated `error`.
    pub async fn fetch_vendor(&self, vendor: &VendorConfig, query: &str) -> FetchResult {
        let url = vendor.listing_url(query);

        match self.fetch_listing(&url).await {
            Ok(html) => {
                let deals = parse_vendor_response(&html, vendor);
                tracing::debug!(vendor = %vendor.name, deals = deals.len(), "vendor fetch ok");
                FetchResult {
                    vendor: vendor.name.clone(),
                    deals,
                    error: None,
                    url,
                }
            }
            Err(e) => {
                tracing::warn!(vendor = %vendor.name, url = %url, error = %e, "vendor fetch failed");
                FetchResult {
                    vendor: vendor.name.clone(),
                    deals: Vec::new(),
                    error: Some(e.to_string()),
                    url,
                }
            }
        }
    }

    async fn fetch_listing(&self, url: &str) -> Result<String, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Error").to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
