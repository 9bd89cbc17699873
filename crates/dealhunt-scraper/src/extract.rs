//! Selector-driven extraction of deal records from vendor listing markup.
//!
//! A pure function of (markup, vendor config). The underlying parser is
//! html5ever-based and tolerant: malformed markup degrades to zero matches,
//! never an error. Missing fields degrade to per-field defaults; the one
//! exception is an unparseable price, which drops the whole card.

use scraper::{ElementRef, Html, Selector};

use dealhunt_core::{DealRecord, VendorConfig};

use crate::normalize::{normalize_image_url, normalize_price, normalize_url};

/// Compile a selector, treating an invalid pattern as matching nothing.
fn compile_selector(vendor: &str, role: &str, raw: &str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(vendor, role, selector = raw, error = ?e, "invalid selector");
            None
        }
    }
}

/// Trimmed text content of the first match under `card`, if any is found.
fn first_text(card: ElementRef<'_>, selector: Option<&Selector>) -> Option<String> {
    let element = card.select(selector?).next()?;
    Some(element.text().collect::<String>().trim().to_string())
}

/// First match under `card` whose trimmed text is non-empty.
///
/// Some markup dialects emit several candidate title nodes per card with
/// only one populated, so this walks all matches in document order instead
/// of trusting the first.
fn first_nonempty_text(card: ElementRef<'_>, selector: Option<&Selector>) -> Option<String> {
    card.select(selector?)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

/// Image source of the first match under `card`: `src`, then the lazy-load
/// `data-src`, then the first URL token of `srcset`.
fn first_image_src(card: ElementRef<'_>, selector: Option<&Selector>) -> Option<String> {
    let img = card.select(selector?).next()?;
    let value = img.value();

    let src = value
        .attr("src")
        .filter(|s| !s.is_empty())
        .or_else(|| value.attr("data-src").filter(|s| !s.is_empty()))
        .map(str::to_string)
        .or_else(|| {
            value
                .attr("srcset")
                .and_then(|srcset| srcset.split(',').next())
                .and_then(|entry| entry.split_whitespace().next())
                .map(str::to_string)
        });

    Some(src.unwrap_or_default())
}

/// Extract one [`DealRecord`] per product card found in `html`.
///
/// Records preserve document order; sorting is the caller's concern. Cards
/// whose normalized price is exactly zero are dropped: zero-priced or
/// unparseable-priced listings are treated as out-of-stock placeholder
/// noise. Flagged upstream as a product-level ambiguity, but consumers
/// depend on it, so the behavior is kept exactly.
#[must_use]
pub fn parse_vendor_response(html: &str, config: &VendorConfig) -> Vec<DealRecord> {
    let document = Html::parse_document(html);

    let Some(card_selector) = compile_selector(&config.name, "card", &config.selectors.card)
    else {
        return Vec::new();
    };
    let title_selector = compile_selector(&config.name, "title", &config.selectors.title);
    let price_selector = compile_selector(&config.name, "price", &config.selectors.price);
    let link_selector = compile_selector(&config.name, "link", &config.selectors.link);
    let image_selector = compile_selector(&config.name, "image", &config.selectors.image);

    let mut deals = Vec::new();

    for card in document.select(&card_selector) {
        let title = first_nonempty_text(card, title_selector.as_ref())
            .unwrap_or_else(|| "Unknown".to_string());

        let price_str = first_text(card, price_selector.as_ref())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "$0.00".to_string());
        let price_val = normalize_price(&price_str);
        if price_val <= 0.0 {
            continue;
        }

        let href = link_selector
            .as_ref()
            .and_then(|sel| card.select(sel).next())
            .and_then(|el| el.value().attr("href"))
            .unwrap_or("#");
        let link = normalize_url(href, &config.base_url);

        let image_src = first_image_src(card, image_selector.as_ref()).unwrap_or_default();
        let image = normalize_image_url(&image_src, Some(&config.base_url));

        deals.push(DealRecord {
            vendor: config.name.clone(),
            title,
            price_str,
            price_val,
            link,
            image,
        });
    }

    deals
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
