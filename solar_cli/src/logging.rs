// ==========================================
// Logging setup
// ==========================================
// tracing-subscriber with an env-driven filter.
// Output goes to stderr so stdout stays clean for JSON.
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// # Environment
/// - RUST_LOG: filter directives (default: info),
///   e.g. `RUST_LOG=debug` or `RUST_LOG=solar_core=trace`
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}
