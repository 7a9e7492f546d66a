//! Product catalog module.
//!
//! Contains the product record served by the catalog API and the closed
//! set of storefront categories.

mod category;
mod product;

pub use category::Category;
pub use product::{Product, DEFAULT_DESCRIPTION};
