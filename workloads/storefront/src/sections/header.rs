//! Site header.

/// Render the header with brand, login button and live cart count.
///
/// The count badge carries `data-cart-count` so the cart script can
/// update it in place.
pub fn render_header(cart_count: u64) -> String {
    format!(
        r#"<header class="site-header">
    <div class="container header-row">
        <a class="brand" href="/">
            <span class="brand-mark">HC</span>
            <span class="brand-name">The Herbal Chicken</span>
        </a>
        <div class="header-actions">
            <button type="button" class="btn-outline">Login</button>
            <span class="cart-badge" data-cart-count>Cart ({count})</span>
        </div>
    </div>
</header>"#,
        count = cart_count
    )
}
