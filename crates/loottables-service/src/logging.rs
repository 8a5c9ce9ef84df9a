use tracing_subscriber::fmt::time::UtcTime;

/// Initializes process-wide logging with the given `env_filter` directives.
///
/// Call once at startup. Library code only emits `tracing` events and never
/// installs a subscriber on its own.
pub fn init_logging(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_timer(UtcTime::rfc_3339())
        .with_target(true)
        .with_env_filter(env_filter)
        .init();
}
