use super::*;
use dealhunt_core::SelectorSet;

fn magento_vendor() -> VendorConfig {
    VendorConfig {
        name: "GetFPV".to_string(),
        base_url: "https://www.getfpv.com".to_string(),
        clearance_path: "/on-sale/clearance.html".to_string(),
        search_path: "/catalogsearch/result/?q={query}".to_string(),
        selectors: SelectorSet {
            card: "li.product-item".to_string(),
            title: "a.product-item-link".to_string(),
            price: "span.price".to_string(),
            image: "img.product-image-photo".to_string(),
            link: "a.product-item-link".to_string(),
        },
    }
}

fn shopify_vendor() -> VendorConfig {
    VendorConfig {
        name: "Pyrodrone".to_string(),
        base_url: "https://pyrodrone.com".to_string(),
        clearance_path: "/collections/clearance".to_string(),
        search_path: "/search?q={query}".to_string(),
        selectors: SelectorSet {
            card: ".product-card".to_string(),
            title: ".card__heading, .full-unstyled-link".to_string(),
            price: "span.price-item--sale, span.price-item--regular".to_string(),
            image: ".card__media img".to_string(),
            link: "a.full-unstyled-link".to_string(),
        },
    }
}

#[test]
fn extracts_single_magento_card() {
    let html = r#"
        <ul>
          <li class="product-item">
            <a class="product-item-link" href="/test">Test Product</a>
            <span class="price">$25.00</span>
            <img class="product-image-photo" src="/media/test.jpg">
          </li>
        </ul>
    "#;

    let deals = parse_vendor_response(html, &magento_vendor());
    assert_eq!(deals.len(), 1, "expected exactly one record");
    let deal = &deals[0];
    assert_eq!(deal.vendor, "GetFPV");
    assert_eq!(deal.title, "Test Product");
    assert_eq!(deal.price_str, "$25.00");
    assert!((deal.price_val - 25.0).abs() < f64::EPSILON);
    assert_eq!(deal.link, "https://www.getfpv.com/test");
    assert_eq!(deal.image, "https://www.getfpv.com/media/test.jpg");
}

#[test]
fn drops_zero_priced_cards() {
    let html = r#"
        <li class="product-item">
          <a class="product-item-link" href="/free">Freebie</a>
          <span class="price">$0.00</span>
        </li>
        <li class="product-item">
          <a class="product-item-link" href="/sold">Sold Out</a>
          <span class="price">Free</span>
        </li>
        <li class="product-item">
          <a class="product-item-link" href="/real">Real Deal</a>
          <span class="price">$12.50</span>
        </li>
    "#;

    let deals = parse_vendor_response(html, &magento_vendor());
    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0].title, "Real Deal");
    assert!(deals.iter().all(|d| d.price_val > 0.0));
}

#[test]
fn card_without_price_element_is_dropped() {
    let html = r#"
        <li class="product-item">
          <a class="product-item-link" href="/a">No Price Here</a>
        </li>
    "#;
    assert!(parse_vendor_response(html, &magento_vendor()).is_empty());
}

#[test]
fn missing_title_defaults_to_unknown() {
    let html = r#"
        <li class="product-item">
          <span class="price">$9.99</span>
        </li>
    "#;
    let deals = parse_vendor_response(html, &magento_vendor());
    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0].title, "Unknown");
    assert_eq!(deals[0].link, "https://www.getfpv.com#");
}

#[test]
fn title_skips_empty_candidates() {
    // Shopify themes often render one visually-hidden empty heading plus a
    // populated link; the populated one must win.
    let html = r#"
        <div class="product-card">
          <span class="card__heading">   </span>
          <a class="full-unstyled-link" href="/products/frame">5" Freestyle Frame</a>
          <span class="price-item--sale">$39.99</span>
        </div>
    "#;
    let deals = parse_vendor_response(html, &shopify_vendor());
    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0].title, "5\" Freestyle Frame");
}

#[test]
fn absolute_link_passes_through() {
    let html = r#"
        <li class="product-item">
          <a class="product-item-link" href="https://elsewhere.com/p/1">Ext</a>
          <span class="price">$5.00</span>
        </li>
    "#;
    let deals = parse_vendor_response(html, &magento_vendor());
    assert_eq!(deals[0].link, "https://elsewhere.com/p/1");
}

#[test]
fn image_falls_back_to_data_src() {
    let html = r#"
        <div class="product-card">
          <a class="full-unstyled-link" href="/p">Lazy</a>
          <span class="price-item--regular">$15.00</span>
          <div class="card__media"><img data-src="//cdn.shopify.com/lazy.jpg"></div>
        </div>
    "#;
    let deals = parse_vendor_response(html, &shopify_vendor());
    assert_eq!(deals[0].image, "https://cdn.shopify.com/lazy.jpg");
}

#[test]
fn image_falls_back_to_first_srcset_entry() {
    let html = r#"
        <div class="product-card">
          <a class="full-unstyled-link" href="/p">Srcset</a>
          <span class="price-item--regular">$15.00</span>
          <div class="card__media">
            <img srcset="//cdn.shopify.com/a_320.jpg 320w, //cdn.shopify.com/a_640.jpg 640w">
          </div>
        </div>
    "#;
    let deals = parse_vendor_response(html, &shopify_vendor());
    assert_eq!(deals[0].image, "https://cdn.shopify.com/a_320.jpg");
}

#[test]
fn missing_image_element_yields_placeholder() {
    let html = r#"
        <li class="product-item">
          <a class="product-item-link" href="/p">No Image</a>
          <span class="price">$8.00</span>
        </li>
    "#;
    let deals = parse_vendor_response(html, &magento_vendor());
    assert_eq!(deals[0].image, crate::normalize::PLACEHOLDER_IMAGE);
}

#[test]
fn preserves_document_order() {
    let html = r#"
        <li class="product-item">
          <a class="product-item-link" href="/b">Pricier</a>
          <span class="price">$90.00</span>
        </li>
        <li class="product-item">
          <a class="product-item-link" href="/a">Cheaper</a>
          <span class="price">$10.00</span>
        </li>
    "#;
    let deals = parse_vendor_response(html, &magento_vendor());
    let titles: Vec<_> = deals.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, ["Pricier", "Cheaper"], "extractor must not sort");
}

#[test]
fn empty_markup_yields_empty_list() {
    assert!(parse_vendor_response("", &magento_vendor()).is_empty());
}

#[test]
fn malformed_markup_never_panics() {
    let mangled = "<li class=\"product-item\"><a href='/x' class=product-item-link>Broken\
                   <span class='price'>$7.77<div><<<>>></li></ul></body>";
    let deals = parse_vendor_response(mangled, &magento_vendor());
    // The tolerant parser may or may not recover the card; the contract is
    // only that nothing panics and any record that comes out is priced.
    assert!(deals.iter().all(|d| d.price_val > 0.0));
}

#[test]
fn invalid_card_selector_extracts_nothing() {
    let mut vendor = magento_vendor();
    vendor.selectors.card = "li..[".to_string();
    let html = r#"<li class="product-item"><span class="price">$5</span></li>"#;
    assert!(parse_vendor_response(html, &vendor).is_empty());
}

#[test]
fn invalid_field_selector_degrades_to_default() {
    let mut vendor = magento_vendor();
    vendor.selectors.title = ":::".to_string();
    let html = r#"
        <li class="product-item">
          <a class="product-item-link" href="/p">Has Title</a>
          <span class="price">$5.00</span>
        </li>
    "#;
    let deals = parse_vendor_response(html, &vendor);
    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0].title, "Unknown");
}

#[test]
fn multiple_cards_one_record_each() {
    let cards: String = (1..=4)
        .map(|i| {
            format!(
                "<li class=\"product-item\">\
                 <a class=\"product-item-link\" href=\"/p/{i}\">Item {i}</a>\
                 <span class=\"price\">${i}.00</span></li>"
            )
        })
        .collect();
    let deals = parse_vendor_response(&cards, &magento_vendor());
    assert_eq!(deals.len(), 4);
    assert_eq!(deals[3].link, "https://www.getfpv.com/p/4");
}
