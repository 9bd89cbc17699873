use std::collections::HashSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Characters percent-encoded when substituting a search query into a
/// vendor's search-path template. Matches JavaScript's `encodeURIComponent`
/// unreserved set closely enough for storefront search endpoints.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Placeholder replaced by the escaped search query in `search_path`.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// CSS selectors locating the five semantic roles inside one vendor's
/// listing markup. Pure configuration; evaluated by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Repeating container node, one per product listing.
    pub card: String,
    pub title: String,
    pub price: String,
    pub image: String,
    pub link: String,
}

/// One storefront to scrape: where to fetch and how to read the markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Stable display name; unique across the catalog.
    pub name: String,
    /// Origin with scheme and no trailing slash, e.g. `https://www.getfpv.com`.
    pub base_url: String,
    /// Default listing path when no search query is given.
    pub clearance_path: String,
    /// Search path template containing `{query}`.
    pub search_path: String,
    pub selectors: SelectorSet,
}

impl VendorConfig {
    /// Absolute URL of the vendor's clearance listing.
    #[must_use]
    pub fn clearance_url(&self) -> String {
        format!("{}{}", self.base_url, self.clearance_path)
    }

    /// Absolute search URL with `query` percent-encoded into the template.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        let escaped = utf8_percent_encode(query, QUERY_ENCODE).to_string();
        format!(
            "{}{}",
            self.base_url,
            self.search_path.replace(QUERY_PLACEHOLDER, &escaped)
        )
    }

    /// URL for one fetch cycle: clearance when `query` is empty, search
    /// otherwise.
    #[must_use]
    pub fn listing_url(&self, query: &str) -> String {
        if query.is_empty() {
            self.clearance_url()
        } else {
            self.search_url(query)
        }
    }
}

fn shopify_selectors() -> SelectorSet {
    SelectorSet {
        card: "div.grid-view-item, .product-card, .product-item, .card-wrapper, .product-grid-item"
            .to_string(),
        title: "div.grid-view-item__title, .card__heading, .product-item__title, \
                .full-unstyled-link, .product-title, h3 a"
            .to_string(),
        price: "span.price-item--sale, span.price-item--regular, .price__current, \
                .product-price__price, .money, .price"
            .to_string(),
        image: "img.grid-view-item__image, .card__media img, \
                .product-item__image-wrapper img, .product-grid-image img"
            .to_string(),
        link: "a.grid-view-item__link, a.full-unstyled-link, .product-item__image-link, \
               .product-card a"
            .to_string(),
    }
}

fn magento_selectors() -> SelectorSet {
    SelectorSet {
        card: "li.product-item".to_string(),
        title: "a.product-item-link".to_string(),
        price: "span.price".to_string(),
        image: "img.product-image-photo".to_string(),
        link: "a.product-item-photo".to_string(),
    }
}

fn racedayquads_selectors() -> SelectorSet {
    SelectorSet {
        card: "div.product-item".to_string(),
        title: "a.product-item__title".to_string(),
        price: "span.price".to_string(),
        image: "div.product-item__image-wrapper img".to_string(),
        link: "a.product-item__title".to_string(),
    }
}

fn shopify_vendor(name: &str, base_url: &str, clearance_path: &str) -> VendorConfig {
    VendorConfig {
        name: name.to_string(),
        base_url: base_url.to_string(),
        clearance_path: clearance_path.to_string(),
        search_path: "/search?q={query}".to_string(),
        selectors: shopify_selectors(),
    }
}

/// The built-in storefront catalog.
///
/// Fifteen independent FPV vendors across three markup dialects. Order here
/// is the order failures are reported in, so keep it stable.
#[must_use]
pub fn builtin_vendors() -> Vec<VendorConfig> {
    let mut vendors = vec![
        VendorConfig {
            name: "GetFPV".to_string(),
            base_url: "https://www.getfpv.com".to_string(),
            clearance_path: "/on-sale/clearance.html?product_list_limit=100".to_string(),
            search_path: "/catalogsearch/result/?q={query}".to_string(),
            selectors: magento_selectors(),
        },
        VendorConfig {
            name: "RaceDayQuads".to_string(),
            base_url: "https://www.racedayquads.com".to_string(),
            clearance_path: "/collections/clearance".to_string(),
            search_path: "/search?q={query}".to_string(),
            selectors: racedayquads_selectors(),
        },
    ];

    vendors.extend([
        shopify_vendor("Pyrodrone", "https://pyrodrone.com", "/collections/clearance"),
        shopify_vendor("NewBeeDrone", "https://newbeedrone.com", "/collections/clearance"),
        shopify_vendor(
            "DefianceRC",
            "https://www.defiancerc.com",
            "/collections/discounted-products",
        ),
        shopify_vendor("TinyWhoop", "https://www.tinywhoop.com", "/collections/clearance"),
        shopify_vendor("Wrekd", "https://wrekd.com", "/collections/clearance"),
        shopify_vendor("WeBleedFPV", "https://webleedfpv.com", "/collections/clearance-1"),
        shopify_vendor("Five33", "https://flyfive33.com", "/collections/last-chance-sale"),
        shopify_vendor("BetaFPV", "https://betafpv.com", "/collections/on-sale"),
        shopify_vendor(
            "ProgressiveRC",
            "https://www.progressiverc.com",
            "/collections/clearance",
        ),
        shopify_vendor("Emax USA", "https://emax-usa.com", "/collections/clearance"),
        shopify_vendor("Rotor Riot", "https://rotorriot.com", "/collections/clearance-sale"),
        shopify_vendor(
            "Stan FPV",
            "https://stanfpv.com",
            "/collections/black-friday-cyber-monday-sale-items",
        ),
        shopify_vendor("Ovonic", "https://us.ovonicshop.com", "/collections/hot-sale"),
    ]);

    vendors
}

/// Validate a vendor catalog before it is handed to the aggregator.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] on the first vendor with an empty or
/// duplicate name, a base URL that is not an absolute origin, a path that
/// does not begin with `/`, a search template without the query
/// placeholder, or an empty selector.
pub fn validate_vendors(vendors: &[VendorConfig]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for vendor in vendors {
        if vendor.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "vendor name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(vendor.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate vendor name: '{}'",
                vendor.name
            )));
        }

        if !(vendor.base_url.starts_with("https://") || vendor.base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' base_url must be an absolute http(s) origin, got '{}'",
                vendor.name, vendor.base_url
            )));
        }

        if vendor.base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' base_url must not end with '/'; paths are concatenated directly",
                vendor.name
            )));
        }

        if !vendor.clearance_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' clearance_path must begin with '/'",
                vendor.name
            )));
        }

        if !vendor.search_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' search_path must begin with '/'",
                vendor.name
            )));
        }

        if !vendor.search_path.contains(QUERY_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' search_path must contain '{QUERY_PLACEHOLDER}'",
                vendor.name
            )));
        }

        let selectors = [
            ("card", &vendor.selectors.card),
            ("title", &vendor.selectors.title),
            ("price", &vendor.selectors.price),
            ("image", &vendor.selectors.image),
            ("link", &vendor.selectors.link),
        ];
        for (role, selector) in selectors {
            if selector.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "vendor '{}' has an empty {role} selector",
                    vendor.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "vendors_test.rs"]
mod tests;
