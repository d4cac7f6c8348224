//! Tracing init.
//!
//! Honors PYBALE_LOG_LEVEL, PYBALE_QUIET, and PYBALE_LOG_JSON from the
//! environment; RUST_LOG wins when set.

use tracing_subscriber::{prelude::*, EnvFilter};

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Initialize tracing. Call once at process startup.
/// When PYBALE_QUIET=1, only WARN and above are logged.
pub fn init_tracing() {
    let level = if env_flag("PYBALE_QUIET") {
        "pybale=warn".to_string()
    } else {
        std::env::var("PYBALE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if env_flag("PYBALE_LOG_JSON") {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}
