//! Global `tracing` subscriber for library-level diagnostics.
//!
//! `StructuredLogger` covers request-level events. The data crate reports
//! per-fetch and stale-discard events through `tracing`, which go nowhere
//! until a subscriber is installed.

use tracing_subscriber::EnvFilter;

use crate::logging::{LogFormat, LogLevel};

/// Crates whose `tracing` events are written out.
pub const TRACED_CRATES: [&str; 2] = ["herbal_data", "herbal_storefront"];

/// Filter directives enabling `level` for [`TRACED_CRATES`] only.
pub fn tracing_directives(level: LogLevel) -> String {
    TRACED_CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level.as_str()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install a stderr subscriber at `level` in `format`.
///
/// Returns `false` if a global subscriber was already set, which happens
/// when a component instance serves more than one request.
pub fn install_tracing(level: LogLevel, format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(tracing_directives(level)))
        .with_writer(std::io::stderr)
        .with_ansi(false);

    match format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Human => builder.try_init().is_ok(),
    }
}
