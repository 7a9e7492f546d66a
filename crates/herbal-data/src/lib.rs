//! Data access layer for the storefront sections.
//!
//! This crate provides:
//! - `Transport` - Seam over the outbound HTTP implementation
//! - `ApiClient` - Base-URL aware JSON client
//! - `Endpoint` / `DependencyTag` - The read-only REST endpoints
//! - `Resource` - Fetch hook that only applies the latest request's outcome

mod client;
mod dependency;
mod endpoints;
mod resource;
mod transport;

pub use client::*;
pub use dependency::*;
pub use endpoints::*;
pub use resource::*;
pub use transport::*;
