//! Offers grid.

use herbal_sdk::herbal_commerce::prelude::{Listing, Offer};
use herbal_sdk::herbal_data::{ApiClient, Endpoint, Resource, Settle, Transport};
use herbal_sdk::herbal_streaming::escape_html;

/// Offers grid that loads its own data.
#[derive(Debug, Default)]
pub struct OfferGrid {
    resource: Resource<Listing<Offer>>,
}

impl OfferGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint() -> Endpoint {
        Endpoint::Offers
    }

    pub async fn load<T: Transport>(&self, client: &ApiClient<T>) -> Settle {
        self.resource.load(client, &Self::endpoint()).await
    }

    pub fn resource(&self) -> &Resource<Listing<Offer>> {
        &self.resource
    }

    pub fn render(&self) -> String {
        self.resource
            .with_data(|offers| render_offers(offers.map(Listing::items).unwrap_or_default()))
    }
}

/// Render one card per offer, or nothing for an empty list.
pub fn render_offers(offers: &[Offer]) -> String {
    if offers.is_empty() {
        return String::new();
    }

    let items: String = offers
        .iter()
        .map(|offer| {
            format!(
                r#"<div class="offer-card"><div class="offer-title">{title}</div><div class="offer-description">{description}</div></div>"#,
                title = escape_html(&offer.title),
                description = escape_html(offer.description.as_deref().unwrap_or_default())
            )
        })
        .collect();

    format!(
        r#"<section class="container offer-grid" data-section="offers">{}</section>"#,
        items
    )
}
