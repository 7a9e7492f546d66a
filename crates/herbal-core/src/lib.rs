//! Core abstractions for the Herbal storefront.
//!
//! This crate provides the fundamental types shared by every other crate:
//! - `StoreConfig` - Environment-driven storefront configuration
//! - `RequestContext` - Typed request with parsed query parameters
//! - `RenderError` - Errors raised while streaming a page

mod config;
mod context;
mod error;

pub use config::*;
pub use context::*;
pub use error::*;

pub use http::Method;
