//! Root composition: session state wired to the sections.

use futures::join;
use herbal_sdk::herbal_commerce::prelude::{Cart, CartLine, Category, CommerceError, Product};
use herbal_sdk::herbal_core::StoreConfig;
use herbal_sdk::herbal_data::{ApiClient, Settle, Ticket, Transport};

use crate::sections::{render_categories, render_header, BannerStrip, OfferGrid, ProductGrid};

/// The storefront page.
///
/// The active category and the cart are the only session state; each
/// section owns its own fetch state.
#[derive(Debug)]
pub struct Storefront {
    active: Category,
    cart: Cart,
    banners: BannerStrip,
    products: ProductGrid,
    offers: OfferGrid,
}

impl Storefront {
    pub fn new(active: Category, skeleton_count: usize) -> Self {
        Self {
            active,
            cart: Cart::new(),
            banners: BannerStrip::new(),
            products: ProductGrid::new(skeleton_count),
            offers: OfferGrid::new(),
        }
    }

    /// Build from configuration, starting on `active`.
    pub fn from_config(config: &StoreConfig, active: Category) -> Self {
        Self::new(active, config.skeleton_count)
    }

    pub fn active(&self) -> Category {
        self.active
    }

    /// Make `category` active.
    ///
    /// Returns the ticket of the single product request that supersedes
    /// any in-flight one, or `None` if the category did not change.
    pub fn select_category(&mut self, category: Category) -> Option<Ticket> {
        if category == self.active {
            return None;
        }
        self.active = category;
        self.products.watch(category)
    }

    /// Fetch and settle a product request issued by [`Self::select_category`].
    pub async fn complete_products<T: Transport>(
        &self,
        client: &ApiClient<T>,
        ticket: Ticket,
    ) -> Settle {
        self.products.resource().complete(client, ticket).await
    }

    pub fn add_to_cart(&mut self, product: &Product) -> Result<&CartLine, CommerceError> {
        self.cart.add(product)
    }

    /// Sum of quantities across cart lines.
    pub fn cart_count(&self) -> u64 {
        self.cart.count()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Load banners, offers and the active category's products concurrently.
    pub async fn mount<T: Transport>(&self, client: &ApiClient<T>) {
        join!(
            self.banners.load(client),
            self.products.load(client, self.active),
            self.offers.load(client),
        );
    }

    /// Discard every in-flight section load.
    pub fn unmount(&self) {
        self.banners.resource().unmount();
        self.products.resource().unmount();
        self.offers.resource().unmount();
    }

    pub fn banners(&self) -> &BannerStrip {
        &self.banners
    }

    pub fn products(&self) -> &ProductGrid {
        &self.products
    }

    pub fn offers(&self) -> &OfferGrid {
        &self.offers
    }

    /// Render the page body from current state, in display order.
    pub fn render_body(&self) -> String {
        [
            render_header(self.cart_count()),
            self.banners.render(),
            render_categories(self.active),
            self.products.render(),
            self.offers.render(),
        ]
        .join("\n")
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default(), Category::default())
    }
}

/// Pick the category for a request.
///
/// An absent `requested` value selects the configured default. An unknown
/// name also selects the default and returns the parse error for logging.
pub fn resolve_category(
    requested: Option<&str>,
    config: &StoreConfig,
) -> (Category, Option<CommerceError>) {
    let fallback: Category = config.default_category.parse().unwrap_or_default();
    match requested.filter(|r| !r.trim().is_empty()) {
        None => (fallback, None),
        Some(name) => match name.parse::<Category>() {
            Ok(category) => (category, None),
            Err(e) => (fallback, Some(e)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herbal_sdk::herbal_commerce::prelude::ProductId;
    use herbal_sdk::herbal_data::MockTransport;

    fn product(id: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "title": format!("Product {}", id),
            "price": 100,
            "image_url": format!("/{}.jpg", id),
        }))
        .unwrap()
    }

    fn store_transport() -> MockTransport {
        MockTransport::new()
            .with_json("/api/banners", r#"[{"title": "Sale", "image_url": "/b.jpg"}]"#)
            .with_json("/api/offers", r#"[{"title": "Free delivery"}]"#)
            .with_json(
                "/api/products?category=Chicken",
                r#"[{"_id": "c1", "title": "Curry Cut", "price": 249}]"#,
            )
            .with_json(
                "/api/products?category=Fish",
                r#"[{"_id": "f1", "title": "Rohu", "price": 299}, {"_id": "f2", "title": "Prawns", "price": 499}]"#,
            )
    }

    #[test]
    fn test_initial_state() {
        let store = Storefront::default();
        assert_eq!(store.active(), Category::Chicken);
        assert_eq!(store.cart_count(), 0);
        assert!(store.products().resource().is_loading());
    }

    #[test]
    fn test_add_to_cart_updates_count() {
        let mut store = Storefront::default();
        let a = product("a");
        let b = product("b");

        store.add_to_cart(&a).unwrap();
        store.add_to_cart(&b).unwrap();
        store.add_to_cart(&a).unwrap();

        assert_eq!(store.cart_count(), 3);
        assert_eq!(store.cart().lines().len(), 2);
        assert_eq!(store.cart().line(&ProductId::new("a")).unwrap().quantity, 2);
        assert!(store.render_body().contains("Cart (3)"));
    }

    #[tokio::test]
    async fn test_mount_loads_every_section() {
        let client = ApiClient::new("", store_transport());
        let store = Storefront::default();

        store.mount(&client).await;

        assert_eq!(client.transport().requests().len(), 3);
        let body = store.render_body();
        assert!(body.contains(r#"<img src="/b.jpg" alt="Sale""#));
        assert!(body.contains("Curry Cut"));
        assert!(body.contains("Free delivery"));
        assert!(!body.contains("product-card--skeleton"));
    }

    #[tokio::test]
    async fn test_select_category_issues_one_request() {
        let client = ApiClient::new("", store_transport());
        let mut store = Storefront::default();
        store.mount(&client).await;

        assert!(store.select_category(Category::Chicken).is_none());

        let ticket = store.select_category(Category::Fish).unwrap();
        assert!(store.products().resource().is_loading());
        assert!(store.render_body().contains("product-card--skeleton"));

        assert_eq!(store.complete_products(&client, ticket).await, Settle::Applied);
        let body = store.render_body();
        assert!(body.contains("Rohu"));
        assert!(!body.contains("Curry Cut"));
        assert_eq!(
            client
                .transport()
                .requests()
                .iter()
                .filter(|r| r.starts_with("/api/products"))
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_only_active_category_is_rendered() {
        let client = ApiClient::new("", store_transport());
        let mut store = Storefront::default();

        let to_fish = store.select_category(Category::Fish).unwrap();
        let to_chicken = store.select_category(Category::Chicken).unwrap();

        // Chicken settles first, then the superseded Fish response arrives.
        assert_eq!(store.complete_products(&client, to_chicken).await, Settle::Applied);
        assert_eq!(store.complete_products(&client, to_fish).await, Settle::Stale);

        let body = store.render_body();
        assert!(body.contains("Curry Cut"));
        assert!(!body.contains("Rohu"));
    }

    #[tokio::test]
    async fn test_unmount_discards_in_flight() {
        let client = ApiClient::new("", store_transport());
        let mut store = Storefront::default();

        let ticket = store.select_category(Category::Fish).unwrap();
        store.unmount();

        assert_eq!(store.complete_products(&client, ticket).await, Settle::Stale);
        assert!(store.products().resource().data().is_none());
    }

    #[test]
    fn test_resolve_category() {
        let config = StoreConfig::default();
        assert_eq!(resolve_category(None, &config), (Category::Chicken, None));
        assert_eq!(resolve_category(Some("fish"), &config), (Category::Fish, None));
        assert_eq!(resolve_category(Some(" "), &config), (Category::Chicken, None));

        let (category, err) = resolve_category(Some("Beef"), &config);
        assert_eq!(category, Category::Chicken);
        assert_eq!(err, Some(CommerceError::UnknownCategory("Beef".to_string())));
    }

    #[test]
    fn test_resolve_category_uses_configured_default() {
        let config = StoreConfig {
            default_category: "Eggs".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_category(None, &config).0, Category::Eggs);
        assert_eq!(resolve_category(Some("Beef"), &config).0, Category::Eggs);
    }
}
