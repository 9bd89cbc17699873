//! Vendor fan-out: fetch every configured storefront concurrently, merge
//! the survivors, report the casualties.

use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;

use dealhunt_core::{DealRecord, VendorConfig};

use crate::cache::TtlCache;
use crate::client::VendorClient;

/// Cache key for the default (no-query) clearance aggregation.
pub const CLEARANCE_CACHE_KEY: &str = "all-deals";

/// Per-vendor failure descriptor, in vendor-catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct VendorFailure {
    pub vendor: String,
    pub error: String,
    pub url: String,
}

/// The externally visible aggregation result.
///
/// Constructed once per cycle and stored under its cache key; a later cycle
/// for the same key supersedes it rather than mutating it.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResponse {
    pub deals: Vec<DealRecord>,
    pub failed: Vec<VendorFailure>,
    pub cached: bool,
    /// Milliseconds since the Unix epoch, captured before the fan-out began.
    pub timestamp: i64,
    #[serde(rename = "searchQuery")]
    pub search_query: Option<String>,
}

/// Fans one fetch+extract pipeline out per vendor and memoizes the merged
/// result behind a TTL cache.
pub struct Aggregator {
    client: VendorClient,
    vendors: Vec<VendorConfig>,
    cache: TtlCache<AggregateResponse>,
}

impl Aggregator {
    #[must_use]
    pub fn new(client: VendorClient, vendors: Vec<VendorConfig>, cache_ttl: Duration) -> Self {
        Self {
            client,
            vendors,
            cache: TtlCache::new(cache_ttl),
        }
    }

    /// Cache key for a search query: the clearance key when empty, a
    /// query-scoped key otherwise. Distinct queries never collide, and
    /// clearance never collides with a search.
    #[must_use]
    pub fn cache_key(query: &str) -> String {
        if query.is_empty() {
            CLEARANCE_CACHE_KEY.to_string()
        } else {
            format!("search:{query}")
        }
    }

    /// Fetches deals from every configured vendor concurrently.
    ///
    /// Returns a live cache entry (tagged `cached: true`, zero network
    /// activity) unless `skip_cache` is set or the entry has expired.
    /// Otherwise all vendors are fetched in parallel and joined in catalog
    /// order, so the failure list is deterministic regardless of which
    /// vendor answered first. The merged deal list is sorted ascending by
    /// price; the sort is stable, so ties keep their catalog-then-document
    /// order. The fresh response is cached even when `skip_cache` was set,
    /// making a forced refresh benefit subsequent callers.
    pub async fn fetch_all(&self, query: &str, skip_cache: bool) -> AggregateResponse {
        let key = Self::cache_key(query);

        if !skip_cache {
            if let Some(mut hit) = self.cache.get(&key).await {
                tracing::debug!(key = %key, "serving aggregate response from cache");
                hit.cached = true;
                return hit;
            }
        }

        let started_at = Utc::now().timestamp_millis();

        let results = join_all(
            self.vendors
                .iter()
                .map(|vendor| self.client.fetch_vendor(vendor, query)),
        )
        .await;

        let mut deals: Vec<DealRecord> = Vec::new();
        let mut failed: Vec<VendorFailure> = Vec::new();

        for result in results {
            match result.error {
                Some(error) => failed.push(VendorFailure {
                    vendor: result.vendor,
                    error,
                    url: result.url,
                }),
                None => deals.extend(result.deals),
            }
        }

        deals.sort_by(|a, b| a.price_val.total_cmp(&b.price_val));

        tracing::info!(
            deals = deals.len(),
            failed = failed.len(),
            query = %query,
            "aggregated vendor listings"
        );

        let response = AggregateResponse {
            deals,
            failed,
            cached: false,
            timestamp: started_at,
            search_query: if query.is_empty() {
                None
            } else {
                Some(query.to_string())
            },
        };

        self.cache.set(&key, response.clone()).await;

        response
    }
}
