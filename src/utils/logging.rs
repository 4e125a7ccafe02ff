/// Installs a `tracing` fmt subscriber so the hub's subscribe, publish and
/// close events become visible.
///
/// `default_level` is one of "error", "warn", "info", "debug" or "trace";
/// anything else logs at info. Calling this again after a subscriber is
/// installed does nothing.
pub fn init(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(default_level))
        .with_target(false)
        .try_init();
}

pub(crate) fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" | "warning" => tracing::Level::WARN,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    }
}
