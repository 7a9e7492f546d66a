//! Shell-first page streaming and the in-page product grid fragment.

use std::fmt::Display;
use std::time::{Duration, Instant};

use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::{FutureExt, Sink};
use herbal_sdk::herbal_commerce::prelude::{Listing, Rejected};
use herbal_sdk::herbal_core::RenderError;
use herbal_sdk::herbal_data::{ApiClient, Endpoint, FetchError, Resource, Transport};
use herbal_sdk::herbal_observability::{MetricsCollector, StructuredLogger};
use herbal_sdk::herbal_streaming::{slot, HeadContent, Shell, StreamingSink, FILL_SCRIPT};

use crate::app::Storefront;
use crate::sections::{
    render_categories, render_footer, render_header, render_product_skeletons, BannerStrip,
    OfferGrid, ProductGrid,
};

const PAGE_TITLE: &str = "The Herbal Chicken";

/// What a GET request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The full streamed page.
    Page,
    /// Only the product grid, for the in-page category switch.
    ProductsFragment,
}

impl View {
    /// Read the `fragment` query parameter. `None` for an unknown fragment.
    pub fn from_query(fragment: Option<&str>) -> Option<Self> {
        match fragment.map(str::trim) {
            None | Some("") => Some(Self::Page),
            Some("products") => Some(Self::ProductsFragment),
            Some(_) => None,
        }
    }
}

/// A section streamed into its slot after the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSection {
    Banners,
    Products,
    Offers,
}

impl SlotSection {
    pub const ALL: [SlotSection; 3] = [Self::Banners, Self::Products, Self::Offers];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Banners => "banners",
            Self::Products => "products",
            Self::Offers => "offers",
        }
    }

    /// Endpoint this section reads for the store's active category.
    pub fn endpoint(&self, store: &Storefront) -> Endpoint {
        match self {
            Self::Banners => BannerStrip::endpoint(),
            Self::Products => ProductGrid::endpoint(store.active()),
            Self::Offers => OfferGrid::endpoint(),
        }
    }
}

struct Loaded {
    section: SlotSection,
    elapsed: Duration,
}

struct SectionState {
    html: String,
    error: Option<FetchError>,
    items: usize,
    rejected: Vec<Rejected>,
}

/// Build the page shell for the store's current state.
///
/// Banners and offers start empty. The products slot starts with the
/// skeleton grid and the categories slot is final from the start. A copy of
/// the skeleton grid is kept in a template for the category switch.
pub fn page_shell(store: &Storefront, year: i32) -> Shell {
    let head = HeadContent::new(PAGE_TITLE)
        .with_meta("viewport", "width=device-width, initial-scale=1")
        .with_style(STYLES)
        .with_script(FILL_SCRIPT)
        .with_script(CART_SCRIPT)
        .with_script(CATEGORY_SCRIPT);

    let body_start = format!(
        "<body>\n{header}\n<main>\n{banners}\n{categories}\n{products}\n{offers}\n{skeleton}\n",
        header = render_header(store.cart_count()),
        banners = slot("banners", ""),
        categories = slot("categories", &render_categories(store.active())),
        products = slot("products", &store.products().render()),
        offers = slot("offers", ""),
        skeleton = format!(
            r#"<template data-skeleton="products">{}</template>"#,
            render_product_skeletons(store.products().skeleton_count())
        ),
    );

    let body_end = format!("</main>\n{}\n</body>\n</html>\n", render_footer(year));

    Shell::new(head)
        .with_body_start(body_start)
        .with_body_end(body_end)
}

/// Stream the full page.
///
/// The shell goes out first. The three section loads then run
/// concurrently and each section is filled as soon as its own load
/// settles. Failed loads fill with their empty rendering.
pub async fn stream_page<S, E, T>(
    store: &Storefront,
    client: &ApiClient<T>,
    sink: &mut StreamingSink<S, E>,
    year: i32,
    logger: &StructuredLogger,
    metrics: &mut MetricsCollector,
) -> Result<(), RenderError>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
    T: Transport,
{
    let shell = page_shell(store, year);
    sink.send_shell(&shell.render_opening()).await?;
    metrics.record_shell_sent();
    logger.debug("shell sent");

    let mut pending: FuturesUnordered<LocalBoxFuture<'_, Loaded>> = SlotSection::ALL
        .into_iter()
        .map(|section| {
            metrics.record_section_start(section.name());
            load_section(store, client, section)
        })
        .collect();

    while let Some(loaded) = pending.next().await {
        let state = section_state(store, loaded.section);
        let bytes = sink.send_fill(loaded.section.name(), &state.html).await?;
        let endpoint = loaded.section.endpoint(store);
        record_section(client, &endpoint, &loaded, bytes, &state, logger, metrics);
    }

    sink.complete(&shell.render_closing()).await?;
    logger
        .debug_builder("page complete")
        .field("fill_order", sink.sections_sent().join(","))
        .emit();
    Ok(())
}

/// Load the active category's products and render only the grid.
///
/// Serves the in-page category switch. A failed load renders an empty grid.
pub async fn products_fragment<T: Transport>(
    store: &Storefront,
    client: &ApiClient<T>,
    logger: &StructuredLogger,
    metrics: &mut MetricsCollector,
) -> String {
    let section = SlotSection::Products;
    metrics.record_section_start(section.name());

    let loaded = load_section(store, client, section).await;
    let state = section_state(store, section);
    let endpoint = section.endpoint(store);
    record_section(client, &endpoint, &loaded, state.html.len(), &state, logger, metrics);

    state.html
}

fn load_section<'a, T: Transport>(
    store: &'a Storefront,
    client: &'a ApiClient<T>,
    section: SlotSection,
) -> LocalBoxFuture<'a, Loaded> {
    async move {
        let started = Instant::now();
        match section {
            SlotSection::Banners => {
                store.banners().load(client).await;
            }
            SlotSection::Products => {
                store.products().load(client, store.active()).await;
            }
            SlotSection::Offers => {
                store.offers().load(client).await;
            }
        }
        Loaded {
            section,
            elapsed: started.elapsed(),
        }
    }
    .boxed_local()
}

fn section_state(store: &Storefront, section: SlotSection) -> SectionState {
    match section {
        SlotSection::Banners => {
            listing_state(store.banners().render(), store.banners().resource())
        }
        SlotSection::Products => {
            listing_state(store.products().render(), store.products().resource())
        }
        SlotSection::Offers => listing_state(store.offers().render(), store.offers().resource()),
    }
}

fn listing_state<T>(html: String, resource: &Resource<Listing<T>>) -> SectionState {
    let (items, rejected) = resource.with_data(|listing| {
        listing.map_or((0, Vec::new()), |l| (l.len(), l.rejected().to_vec()))
    });
    SectionState {
        html,
        error: resource.error(),
        items,
        rejected,
    }
}

/// Metrics and logs for one settled section.
fn record_section<T: Transport>(
    client: &ApiClient<T>,
    endpoint: &Endpoint,
    loaded: &Loaded,
    bytes: usize,
    state: &SectionState,
    logger: &StructuredLogger,
    metrics: &mut MetricsCollector,
) {
    let name = loaded.section.name();
    metrics.record_section_sent(name, bytes, state.items == 0);

    let outcome = match &state.error {
        Some(e) => Err(e.to_string()),
        None => Ok(state.items),
    };
    let url = client.url_for(&endpoint.path());
    metrics.record_dependency(endpoint.tag().name(), &url, loaded.elapsed, outcome);

    for rejected in &state.rejected {
        logger
            .warn_builder("record skipped")
            .field("section", name)
            .field_u64("index", rejected.index as u64)
            .field("reason", rejected.reason.as_str())
            .emit();
    }

    match &state.error {
        Some(e) => logger
            .warn_builder("section load failed")
            .field("section", name)
            .field("kind", e.kind())
            .field("error", e.to_string())
            .emit(),
        None => logger
            .debug_builder("section filled")
            .field("section", name)
            .field_u64("items", state.items as u64)
            .duration_ms("load_ms", loaded.elapsed)
            .emit(),
    }
}

/// In-page category switch.
///
/// Highlights the clicked pill, shows the skeleton grid and fetches only
/// the product grid. Each fetch takes a sequence number and only the
/// latest one is applied, so a slow earlier response never replaces a
/// newer category. The page, and with it the session cart, stays loaded.
pub const CATEGORY_SCRIPT: &str = r#"(function () {
  var latest = 0;
  document.addEventListener('click', function (event) {
    var link = event.target.closest('[data-category]');
    if (!link || event.button !== 0 || event.metaKey || event.ctrlKey || event.shiftKey) return;
    event.preventDefault();
    var name = link.dataset.category;
    if (link.hasAttribute('aria-current')) return;
    document.querySelectorAll('[data-category]').forEach(function (pill) {
      var active = pill === link;
      pill.classList.toggle('category-pill--active', active);
      if (active) pill.setAttribute('aria-current', 'page');
      else pill.removeAttribute('aria-current');
    });
    history.replaceState(null, '', '?category=' + encodeURIComponent(name));
    var slot = document.querySelector('[data-slot="products"]');
    var skeleton = document.querySelector('template[data-skeleton="products"]');
    if (!slot) return;
    if (skeleton) slot.replaceChildren(skeleton.content.cloneNode(true));
    var request = ++latest;
    fetch(location.pathname + '?category=' + encodeURIComponent(name) + '&fragment=products')
      .then(function (response) { return response.ok ? response.text() : ''; })
      .catch(function () { return ''; })
      .then(function (html) {
        if (request !== latest) return;
        slot.innerHTML = html;
      });
  });
})();"#;

/// Browser-side session cart.
///
/// Mirrors `Cart::add`: one line per product id, repeat adds increment the
/// quantity and the header badge shows the sum of quantities.
pub const CART_SCRIPT: &str = r#"(function () {
  var cart = [];
  function count() {
    return cart.reduce(function (sum, line) { return sum + line.quantity; }, 0);
  }
  document.addEventListener('click', function (event) {
    var button = event.target.closest('[data-add]');
    if (!button) return;
    var id = button.dataset.productId;
    var line = cart.find(function (l) { return l.product_id === id; });
    if (line) {
      line.quantity += 1;
    } else {
      cart.push({
        product_id: id,
        title: button.dataset.title,
        price: Number(button.dataset.price),
        quantity: 1,
        image_url: button.dataset.image
      });
    }
    var badge = document.querySelector('[data-cart-count]');
    if (badge) badge.textContent = 'Cart (' + count() + ')';
  });
})();"#;

const STYLES: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #fff; color: #000; }
.container { max-width: 72rem; margin: 0 auto; padding: 0 1rem; }
.site-header { position: sticky; top: 0; z-index: 40; background: rgba(255,255,255,0.8); backdrop-filter: blur(8px); border-bottom: 1px solid #e5e5e5; }
.header-row { display: flex; align-items: center; justify-content: space-between; padding-top: 0.75rem; padding-bottom: 0.75rem; }
.brand { display: flex; align-items: center; gap: 0.75rem; color: inherit; text-decoration: none; }
.brand-mark { width: 2.25rem; height: 2.25rem; border-radius: 9999px; background: #dc2626; color: #fff; display: grid; place-items: center; font-weight: 700; }
.brand-name { font-weight: 800; font-size: 1.25rem; }
.header-actions { display: flex; align-items: center; gap: 0.75rem; }
.btn-outline { font-size: 0.875rem; padding: 0.375rem 0.75rem; border-radius: 9999px; border: 1px solid #d4d4d4; background: #fff; cursor: pointer; }
.cart-badge { padding: 0.375rem 0.75rem; border-radius: 9999px; background: #000; color: #fff; font-size: 0.875rem; }
.banner-strip { margin-top: 1rem; display: grid; gap: 1rem; }
.banner { aspect-ratio: 16 / 9; border-radius: 0.75rem; overflow: hidden; border: 1px solid #e5e5e5; }
.banner img { width: 100%; height: 100%; object-fit: cover; }
.categories { margin-top: 1.5rem; display: flex; gap: 0.5rem; overflow-x: auto; padding-bottom: 0.5rem; }
.category-pill { padding: 0.5rem 1rem; border-radius: 9999px; border: 1px solid #d4d4d4; font-size: 0.875rem; white-space: nowrap; color: #000; background: #fff; text-decoration: none; }
.category-pill--active { background: #dc2626; color: #fff; border-color: #dc2626; }
.product-grid { margin-top: 1.5rem; display: grid; grid-template-columns: repeat(2, 1fr); gap: 1rem; }
.product-card { border-radius: 0.75rem; border: 1px solid #e5e5e5; background: #fff; overflow: hidden; }
.product-card--skeleton { height: 16rem; background: #f5f5f5; animation: pulse 1.5s ease-in-out infinite; }
.product-image { aspect-ratio: 1; background: #f5f5f5; }
.product-image img { width: 100%; height: 100%; object-fit: cover; }
.product-body { padding: 0.75rem; }
.product-title { font-weight: 600; }
.product-description { font-size: 0.875rem; color: #525252; min-height: 2.5rem; }
.product-footer { margin-top: 0.5rem; display: flex; align-items: center; justify-content: space-between; }
.product-price { font-size: 1.125rem; font-weight: 700; }
.btn-add { padding: 0.375rem 0.75rem; border-radius: 9999px; background: #000; color: #fff; font-size: 0.875rem; border: 0; cursor: pointer; }
.btn-add:hover { background: #dc2626; }
.offer-grid { margin-top: 2rem; display: grid; gap: 1rem; }
.offer-card { border-radius: 0.75rem; border: 1px solid #e5e5e5; padding: 1rem; }
.offer-title { font-weight: 600; }
.offer-description { font-size: 0.875rem; color: #525252; }
.site-footer { margin-top: 3rem; border-top: 1px solid #e5e5e5; }
.footer-row { padding-top: 2rem; padding-bottom: 2rem; font-size: 0.875rem; color: #525252; display: flex; flex-wrap: wrap; align-items: center; justify-content: space-between; gap: 0.5rem; }
.footer-links { display: flex; gap: 1rem; }
.footer-links a { color: inherit; }
.footer-links a:hover { color: #dc2626; }
@keyframes pulse { 50% { opacity: 0.5; } }
@media (min-width: 640px) {
  .banner-strip { grid-template-columns: repeat(2, 1fr); }
  .product-grid { grid-template-columns: repeat(3, 1fr); }
  .offer-grid { grid-template-columns: repeat(3, 1fr); }
}
@media (min-width: 768px) { .product-grid { grid-template-columns: repeat(4, 1fr); } }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use herbal_sdk::herbal_commerce::prelude::Category;
    use herbal_sdk::herbal_core::RequestId;
    use herbal_sdk::herbal_data::MockTransport;

    type TestSink = StreamingSink<Vec<Vec<u8>>, std::convert::Infallible>;

    fn new_sink() -> TestSink {
        StreamingSink::new(Vec::new())
    }

    fn observers() -> (StructuredLogger, MetricsCollector) {
        let id = RequestId::from_string("test");
        (
            StructuredLogger::new(id.clone()).with_min_level(herbal_sdk::herbal_observability::LogLevel::Error),
            MetricsCollector::new(id),
        )
    }

    fn chunks(sink: TestSink) -> Vec<String> {
        sink.into_inner()
            .into_iter()
            .map(|c| String::from_utf8(c).unwrap())
            .collect()
    }

    #[test]
    fn test_shell_has_slots_and_skeletons() {
        let store = Storefront::default();
        let opening = page_shell(&store, 2026).render_opening();

        for name in ["banners", "categories", "products", "offers"] {
            assert!(opening.contains(&format!(r#"data-slot="{}""#, name)));
        }
        // Eight in the products slot, eight more in the switch template.
        let skeletons = opening
            .matches(r#"class="product-card product-card--skeleton""#)
            .count();
        assert_eq!(skeletons, 16);
        assert!(opening.contains(r#"<template data-skeleton="products">"#));
        assert!(opening.contains("Cart (0)"));
        assert!(opening.contains("window.__fill"));
        assert!(opening.find("data-slot=\"banners\"") < opening.find("data-slot=\"products\""));
    }

    #[tokio::test]
    async fn test_stream_page_fills_in_completion_order() {
        // Products arrive last even though they are scheduled second.
        let transport = MockTransport::new()
            .with_json("/api/banners", "[]")
            .with_delayed_json(
                "/api/products?category=Fish",
                r#"[{"_id": "f1", "title": "Rohu", "price": 299}]"#,
                3,
            )
            .with_json("/api/offers", r#"[{"title": "Free delivery"}]"#);
        let client = ApiClient::new("", transport);
        let store = Storefront::new(Category::Fish, 4);
        let (logger, mut metrics) = observers();
        let mut sink = new_sink();

        stream_page(&store, &client, &mut sink, 2026, &logger, &mut metrics)
            .await
            .unwrap();
        assert_eq!(sink.sections_sent(), ["banners", "offers", "products"]);

        let out = chunks(sink);
        assert_eq!(out.len(), 5);
        assert!(out[0].starts_with("<!DOCTYPE html>"));
        assert_eq!(out[1], r#"<template data-fill="banners"></template><script>__fill("banners")</script>"#);
        assert!(out[2].contains("Free delivery"));
        assert!(out[3].starts_with(r#"<template data-fill="products">"#));
        assert!(out[3].contains("Rohu"));
        assert!(!out[3].contains("product-card--skeleton"));
        assert!(out[4].contains("&copy; 2026 The Herbal Chicken"));

        let report = metrics.finalize(Some(200));
        assert!(report.sections["banners"].rendered_empty);
        assert_eq!(report.dependencies["catalog"].items, Some(1));
    }

    #[tokio::test]
    async fn test_failed_sections_fill_empty() {
        let client = ApiClient::new("", MockTransport::new());
        let store = Storefront::default();
        let (logger, mut metrics) = observers();
        let mut sink = new_sink();

        stream_page(&store, &client, &mut sink, 2026, &logger, &mut metrics)
            .await
            .unwrap();

        let out = chunks(sink);
        assert_eq!(out.len(), 5);
        let products = out
            .iter()
            .find(|c| c.starts_with(r#"<template data-fill="products">"#))
            .unwrap();
        assert!(!products.contains("<article"));
        assert!(!products.contains("product-card--skeleton"));
        assert!(store.products().resource().error().is_some());

        let report = metrics.finalize(None);
        assert!(report.dependencies.values().all(|d| !d.success));
    }

    #[test]
    fn test_view_from_query() {
        assert_eq!(View::from_query(None), Some(View::Page));
        assert_eq!(View::from_query(Some("")), Some(View::Page));
        assert_eq!(View::from_query(Some("products")), Some(View::ProductsFragment));
        assert_eq!(View::from_query(Some("offers")), None);
    }

    #[tokio::test]
    async fn test_products_fragment_is_only_the_grid() {
        let transport = MockTransport::new().with_json(
            "/api/products?category=Fish",
            r#"[{"_id": "f1", "title": "Rohu", "price": 299}, {"_id": "f2", "title": "Bad", "price": null}]"#,
        );
        let client = ApiClient::new("", transport);
        let store = Storefront::new(Category::Fish, 4);
        let (logger, mut metrics) = observers();

        let html = products_fragment(&store, &client, &logger, &mut metrics).await;

        assert!(html.starts_with(r#"<section class="container product-grid""#));
        assert!(html.contains("Rohu"));
        assert!(!html.contains("<!DOCTYPE"));
        assert!(!html.contains("product-card--skeleton"));
        assert_eq!(client.transport().requests(), vec!["/api/products?category=Fish"]);

        let report = metrics.finalize(Some(200));
        assert_eq!(report.dependencies["catalog"].items, Some(1));
        assert!(!report.sections["products"].rendered_empty);
    }

    #[tokio::test]
    async fn test_products_fragment_failure_is_empty_grid() {
        let client = ApiClient::new("", MockTransport::new());
        let store = Storefront::new(Category::Eggs, 4);
        let (logger, mut metrics) = observers();

        let html = products_fragment(&store, &client, &logger, &mut metrics).await;

        assert_eq!(
            html,
            r#"<section class="container product-grid" data-section="products"></section>"#
        );
        assert!(!metrics.finalize(None).dependencies["catalog"].success);
    }

    #[test]
    fn test_category_switch_keeps_the_page() {
        assert!(CATEGORY_SCRIPT.contains("event.preventDefault()"));
        assert!(CATEGORY_SCRIPT.contains("'&fragment=products'"));
        assert!(CATEGORY_SCRIPT.contains("var request = ++latest;"));
        assert!(CATEGORY_SCRIPT.contains("if (request !== latest) return;"));
        assert!(!CATEGORY_SCRIPT.contains("cart"));
        assert!(!CATEGORY_SCRIPT.contains("location.href ="));
    }

    #[test]
    fn test_cart_script_mirrors_accumulator() {
        assert!(CART_SCRIPT.contains("line.quantity += 1"));
        assert!(CART_SCRIPT.contains("quantity: 1"));
        assert!(CART_SCRIPT.contains("'Cart (' + count() + ')'"));
    }
}
