//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Directive used when neither `RUST_LOG` nor `--log-level` is given.
pub const DEFAULT_LOG_DIRECTIVE: &str = "eyeblink=info";

/// Build the log filter: `RUST_LOG` wins, then `cli_level`, then the default.
pub fn build_filter(cli_level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    cli_level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Install the global fmt subscriber. Call once from `main`.
///
/// A second call is ignored (the first subscriber stays installed).
pub fn init(cli_level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(cli_level))
        .with_target(false)
        .try_init();
}
