use serde::{Deserialize, Serialize};

/// One normalized product listing, as served on the wire.
///
/// `price_str` keeps the vendor's human-readable rendering (`"$29.99"`);
/// `price_val` is the canonical numeric form used for sorting. Records with a
/// `price_val` of exactly zero are never constructed by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealRecord {
    pub vendor: String,
    pub title: String,
    pub price_str: String,
    pub price_val: f64,
    pub link: String,
    pub image: String,
}
