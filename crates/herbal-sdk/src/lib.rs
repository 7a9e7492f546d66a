//! Public SDK for Herbal storefront workloads.
//!
//! Re-exports the platform crates:
//!
//! ```ignore
//! use herbal_sdk::prelude::*;
//!
//! let client = ApiClient::from_config(&StoreConfig::from_env()?, SpinTransport);
//! let products: Resource<Listing<Product>> = Resource::new();
//! products.load(&client, &Endpoint::products("Chicken")).await;
//! ```

pub use herbal_commerce;
pub use herbal_core;
pub use herbal_data;
pub use herbal_observability;
pub use herbal_streaming;

/// Prelude for convenient imports.
pub mod prelude {
    pub use herbal_commerce::prelude::*;
    pub use herbal_core::*;
    pub use herbal_data::*;
    pub use herbal_observability::*;
    pub use herbal_streaming::*;
}
