//! Promotional banner strip.

use herbal_sdk::herbal_commerce::prelude::{Banner, Listing};
use herbal_sdk::herbal_data::{ApiClient, Endpoint, Resource, Settle, Transport};
use herbal_sdk::herbal_streaming::escape_html;

/// Banner strip that loads its own data.
#[derive(Debug, Default)]
pub struct BannerStrip {
    resource: Resource<Listing<Banner>>,
}

impl BannerStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint() -> Endpoint {
        Endpoint::Banners
    }

    pub async fn load<T: Transport>(&self, client: &ApiClient<T>) -> Settle {
        self.resource.load(client, &Self::endpoint()).await
    }

    pub fn resource(&self) -> &Resource<Listing<Banner>> {
        &self.resource
    }

    /// Render the strip. Nothing while loading, on error or with no banners.
    pub fn render(&self) -> String {
        self.resource
            .with_data(|banners| render_banners(banners.map(Listing::items).unwrap_or_default()))
    }
}

/// Render a banner grid, or nothing for an empty list.
pub fn render_banners(banners: &[Banner]) -> String {
    if banners.is_empty() {
        return String::new();
    }

    let items: String = banners.iter().map(render_banner).collect();

    format!(
        r#"<section class="container banner-strip" data-section="banners">{}</section>"#,
        items
    )
}

fn render_banner(banner: &Banner) -> String {
    format!(
        r#"<div class="banner"><img src="{src}" alt="{alt}" loading="lazy"></div>"#,
        src = escape_html(&banner.image_url),
        alt = escape_html(banner.alt_text())
    )
}
