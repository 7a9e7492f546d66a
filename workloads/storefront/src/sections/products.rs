//! Product grid for the active category.

use herbal_sdk::herbal_commerce::prelude::{Category, Listing, Product};
use herbal_sdk::herbal_data::{ApiClient, Endpoint, Resource, Settle, Ticket, Transport};
use herbal_sdk::herbal_streaming::escape_html;

/// Placeholder cards shown while products load.
pub const DEFAULT_SKELETON_COUNT: usize = 8;

/// Product grid keyed on the active category.
#[derive(Debug)]
pub struct ProductGrid {
    resource: Resource<Listing<Product>>,
    skeleton_count: usize,
}

impl ProductGrid {
    pub fn new(skeleton_count: usize) -> Self {
        Self {
            resource: Resource::new(),
            skeleton_count,
        }
    }

    pub fn endpoint(category: Category) -> Endpoint {
        Endpoint::products(category.name())
    }

    /// Issue a request for `category` unless it is already the current one.
    pub fn watch(&self, category: Category) -> Option<Ticket> {
        self.resource.watch(&Self::endpoint(category).path())
    }

    /// Load `category` if it differs from the last requested one.
    pub async fn load<T: Transport>(
        &self,
        client: &ApiClient<T>,
        category: Category,
    ) -> Option<Settle> {
        self.resource
            .load_if_changed(client, &Self::endpoint(category))
            .await
    }

    pub fn resource(&self) -> &Resource<Listing<Product>> {
        &self.resource
    }

    pub fn skeleton_count(&self) -> usize {
        self.skeleton_count
    }

    /// Skeletons while loading, otherwise one card per product.
    ///
    /// A failed load with no previous data renders an empty grid.
    pub fn render(&self) -> String {
        if self.resource.is_loading() {
            return render_product_skeletons(self.skeleton_count);
        }
        self.resource
            .with_data(|products| render_products(products.map(Listing::items).unwrap_or_default()))
    }
}

impl Default for ProductGrid {
    fn default() -> Self {
        Self::new(DEFAULT_SKELETON_COUNT)
    }
}

/// Render a grid of product cards.
pub fn render_products(products: &[Product]) -> String {
    let cards: String = products.iter().map(render_product_card).collect();
    wrap_grid(&cards)
}

/// Render a grid of `count` pulsing placeholders.
pub fn render_product_skeletons(count: usize) -> String {
    let cards = r#"<div class="product-card product-card--skeleton" aria-hidden="true"></div>"#
        .repeat(count);
    wrap_grid(&cards)
}

fn wrap_grid(cards: &str) -> String {
    format!(
        r#"<section class="container product-grid" data-section="products">{}</section>"#,
        cards
    )
}

/// Render one product card with its "Add" button.
///
/// The button carries the product's id, title, price and image so the
/// cart script can build a line without another request.
pub fn render_product_card(product: &Product) -> String {
    format!(
        r#"<article class="product-card" data-product-id="{id}">
    <div class="product-image"><img src="{image}" alt="{title}" loading="lazy"></div>
    <div class="product-body">
        <div class="product-title">{title}</div>
        <div class="product-description">{description}</div>
        <div class="product-footer">
            <div class="product-price">{price}</div>
            <button type="button" class="btn-add" data-add data-product-id="{id}" data-title="{title}" data-price="{amount}" data-image="{image}">Add</button>
        </div>
    </div>
</article>"#,
        id = escape_html(product.id.as_str()),
        image = escape_html(&product.image_url),
        title = escape_html(&product.title),
        description = escape_html(product.display_description()),
        price = escape_html(&product.price.display()),
        amount = product.price.decimal()
    )
}
