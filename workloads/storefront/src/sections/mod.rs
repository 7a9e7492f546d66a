//! Section renderers and section state for the storefront.

mod banners;
mod categories;
mod footer;
mod header;
mod offers;
mod products;

pub use banners::*;
pub use categories::*;
pub use footer::*;
pub use header::*;
pub use offers::*;
pub use products::*;
