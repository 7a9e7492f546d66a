//! Observability for the Herbal storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Per-request structured logging to stderr
//! - `MetricsCollector` - Shell, section and dependency timing for one request
//! - `install_tracing` - Routes the library crates' `tracing` events to stderr

mod logging;
mod metrics;
mod subscriber;

pub use logging::*;
pub use metrics::*;
pub use subscriber::*;

pub use herbal_core::RequestId;
