//! Field normalizers: raw markup fragments to canonical prices and URLs.
//!
//! These are total functions. Garbage in produces the documented default
//! out, never a panic, because the extractor relies on them to degrade
//! per-field instead of failing a whole card.

/// Served when a card has no usable image source.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=No+Image";

/// Parse a human-readable price string into its numeric value.
///
/// Strips every character except ASCII digits and the decimal point before
/// parsing, which also removes thousands separators (`"$1,299.00"` becomes
/// `1299.0`). Anything that still fails to parse — empty input, `"Free"`,
/// multiple decimal points — yields `0.0`.
#[must_use]
pub fn normalize_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Resolve an extracted href against a vendor origin.
///
/// Absolute URLs (literal `http` prefix) pass through unchanged. Everything
/// else is concatenated directly onto `base_url`: vendor origins carry no
/// trailing slash and extracted paths begin with `/` (or are a bare `#`),
/// so no path joining is performed.
#[must_use]
pub fn normalize_url(url: &str, base_url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{base_url}{url}")
    }
}

/// Resolve an image source attribute to an absolute URL.
///
/// Empty input maps to [`PLACEHOLDER_IMAGE`]; protocol-relative sources
/// (`//cdn...`) get an `https:` scheme; absolute sources pass through;
/// relative sources are concatenated onto `base_url` when one is supplied
/// and returned unchanged otherwise.
#[must_use]
pub fn normalize_image_url(src: &str, base_url: Option<&str>) -> String {
    if src.is_empty() {
        return PLACEHOLDER_IMAGE.to_string();
    }

    if let Some(rest) = src.strip_prefix("//") {
        return format!("https://{rest}");
    }

    if src.starts_with("http") {
        return src.to_string();
    }

    match base_url {
        Some(base) => format!("{base}{src}"),
        None => src.to_string(),
    }
}
