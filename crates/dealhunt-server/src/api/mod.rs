mod deals;

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;

use dealhunt_scraper::Aggregator;

const DASHBOARD_HTML: &str = include_str!("dashboard.html");

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/deals", get(deals::list_deals))
        .fallback(fallback)
        .layer(build_cors())
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(state)
}

async fn dashboard() -> impl IntoResponse {
    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=300"),
            ),
        ],
        DASHBOARD_HTML,
    )
}

/// Any `OPTIONS` request is answered 204 with no body.
///
/// The CORS layer underneath short-circuits every `OPTIONS` itself and
/// answers 200 with the allow headers; the wire contract is 204, so this
/// sits outside it and rewrites the status on the way out. The allow
/// headers and the empty body are preserved.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if is_options {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

async fn fallback() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
