use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use dealhunt_core::DealRecord;
use dealhunt_scraper::VendorFailure;

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct DealsQuery {
    pub q: Option<String>,
    /// Only the literal string `"true"` forces a cache bypass.
    pub refresh: Option<String>,
}

/// Error body for a top-level aggregation failure; the empty lists keep the
/// shape consistent for clients that render unconditionally.
#[derive(Debug, Serialize)]
struct AggregationErrorBody {
    error: String,
    deals: Vec<DealRecord>,
    failed: Vec<VendorFailure>,
}

/// `GET /api/deals?q=<query>&refresh=<bool>`
///
/// Runs the aggregation on its own task: per-vendor faults are already data
/// by the time they reach us, so the only thing left to catch is a panic
/// escaping the fan-out, which surfaces as a 500 with an error body and no
/// cache write.
pub(super) async fn list_deals(
    State(state): State<AppState>,
    Query(query): Query<DealsQuery>,
) -> Response {
    let search_query = query.q.unwrap_or_default();
    let skip_cache = query.refresh.as_deref() == Some("true");

    let aggregator = Arc::clone(&state.aggregator);
    let outcome =
        tokio::spawn(async move { aggregator.fetch_all(&search_query, skip_cache).await }).await;

    match outcome {
        Ok(data) => (
            [(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=900"),
            )],
            Json(data),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "aggregation task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AggregationErrorBody {
                    error: e.to_string(),
                    deals: Vec::new(),
                    failed: Vec::new(),
                }),
            )
                .into_response()
        }
    }
}
