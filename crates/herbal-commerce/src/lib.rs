//! Storefront domain types for the Herbal storefront.
//!
//! - **Catalog**: products and the closed set of categories
//! - **Content**: promotional banners and offers
//! - **Listing**: API arrays decoded record by record
//! - **Cart**: session cart with add/increment semantics
//!
//! # Example
//!
//! ```rust
//! use herbal_commerce::prelude::*;
//!
//! let product: Product = serde_json::from_str(
//!     r#"{"_id": "p-1", "title": "Curry Cut", "price": 249, "image_url": "/img/curry.jpg"}"#,
//! ).unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add(&product).unwrap();
//! cart.add(&product).unwrap();
//!
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.subtotal().unwrap().display(), "\u{20b9}498.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod content;
pub mod listing;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{Cart, CartLine, MAX_QUANTITY_PER_LINE};
    pub use crate::catalog::{Category, Product};
    pub use crate::content::{Banner, Offer};
    pub use crate::listing::{Listing, Rejected};
}
