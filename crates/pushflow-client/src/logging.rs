//! Tracing subscriber setup for hosts that do not install their own.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Without `RUST_LOG`, PushFlow crates log at `debug` when `debug` is set
/// and at `warn` otherwise. Returns `false` if a global subscriber was
/// already installed.
pub fn init(debug: bool) -> bool {
    let fallback = if debug { "pushflow=debug" } else { "pushflow=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
