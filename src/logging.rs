use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// kiss3d's GL layer is chatty at debug level
const QUIET_DEPENDENCIES: &str = "kiss3d=warn";

/// Installs the global tracing subscriber. `RUST_LOG`, if set, takes precedence over
/// `level`.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| env_filter(level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    // Ignore the error if a subscriber is already installed (e.g. by a test harness)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}

pub fn env_filter(level: &str) -> EnvFilter {
    let level = if level.trim().is_empty() { "info" } else { level };
    EnvFilter::new(format!("{},{}", level, QUIET_DEPENDENCIES))
}
