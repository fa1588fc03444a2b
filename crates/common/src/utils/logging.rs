use std::io;
use tracing_subscriber::{fmt, EnvFilter};

fn env_filter_or(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize tracing subscriber with compact human-readable output on stdout.
/// - Respects `RUST_LOG` if set
/// - Falls back to `default_filter` (e.g. `info,sqlx=warn`)
pub fn init_logging_default(default_filter: &str) {
    let _ = fmt()
        .with_env_filter(env_filter_or(default_filter))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, otherwise uses `default_filter`
/// - Service events carry `id`, `email`, `role` fields which end up as JSON keys
pub fn init_logging_json(default_filter: &str) {
    let _ = fmt()
        .with_env_filter(env_filter_or(default_filter))
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the output format at runtime.
pub fn init_logging(json: bool, default_filter: &str) {
    if json {
        init_logging_json(default_filter);
    } else {
        init_logging_default(default_filter);
    }
}

/// Subscriber for unit tests; output is captured by the test harness.
pub fn init_test_logging() {
    let _ = fmt()
        .with_env_filter(env_filter_or("debug"))
        .with_test_writer()
        .try_init();
}
