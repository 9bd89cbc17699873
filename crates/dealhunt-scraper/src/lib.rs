pub mod aggregate;
pub mod cache;
pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;

pub use aggregate::{AggregateResponse, Aggregator, VendorFailure, CLEARANCE_CACHE_KEY};
pub use cache::TtlCache;
pub use client::{FetchResult, VendorClient};
pub use error::ScraperError;
pub use extract::parse_vendor_response;
pub use normalize::{normalize_image_url, normalize_price, normalize_url, PLACEHOLDER_IMAGE};
