//! Tracing initialization for the beatsmith servers.
//!
//! Filtering is controlled through the `RUST_LOG` environment variable,
//! e.g. `RUST_LOG=debug` or `RUST_LOG=warn,beatsmith_common=debug`.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Defaults to `info` when `RUST_LOG` is not set.
///
/// # Panics
///
/// Panics if called more than once, as the global subscriber can only be
/// set once.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Try to initialize tracing, returning an error if already initialized.
///
/// Useful in tests where initialization may happen more than once.
pub fn try_init_tracing() -> Result<(), ()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_tracing_does_not_panic() {
        // May succeed or fail depending on test order, but never panics
        let _ = try_init_tracing();
    }

    #[test]
    fn test_env_filter_parses_module_specific() {
        let filter = EnvFilter::new("warn,beatsmith_common=debug");
        drop(filter);
    }
}
