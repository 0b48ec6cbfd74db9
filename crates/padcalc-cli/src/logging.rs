//! Log subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Builds the log filter: `RUST_LOG` wins, otherwise the verbosity level
#[must_use]
pub fn filter_for(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()))
}

/// Installs a compact stderr subscriber; a second call is a no-op
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
