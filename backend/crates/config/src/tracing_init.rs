use tracing_subscriber::{fmt, EnvFilter};

/// Noisy dependency targets capped at `warn`.
const QUIET_TARGETS: &[&str] = &["hyper=warn", "sqlx=warn", "reqwest=warn"];

/// Initialize the tracing subscriber with env-based filtering.
///
/// `RUST_LOG` wins over `LOG_LEVEL`; `default_level` applies when neither is set.
/// `QUIET_TARGETS` only cap the default, never an explicit filter.
/// Calling this more than once is a no-op.
pub fn init_tracing(default_level: &str) {
    let filter = build_filter(default_level);
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}

fn build_filter(default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("RUST_LOG") {
        return filter;
    }
    if let Ok(filter) = EnvFilter::try_from_env("LOG_LEVEL") {
        return filter;
    }

    // Only the built-in default gets the dependency caps.
    QUIET_TARGETS
        .iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(EnvFilter::new(default_level), |filter, directive| {
            filter.add_directive(directive)
        })
}
