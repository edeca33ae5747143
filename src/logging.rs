// Logging setup — powered by tracing-subscriber
//
// Uses tracing-subscriber for structured spans & events. A compatibility
// bridge (`tracing_log::LogTracer`) captures all `log::*` macro calls from
// the library crates and routes them through the tracing subscriber so span
// context is preserved end-to-end.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Build the `EnvFilter` from the base level plus hardcoded noisy-crate
/// overrides.
fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    // Base directive — set the default level
    let mut directives = vec![level.to_string()];

    // Suppress noisy third-party crates
    let noisy: &[(&str, &str)] = &[
        ("sqlparser", "warn"),
        ("datafusion", "warn"),
        ("datafusion_optimizer", "warn"),
        ("datafusion_datasource", "warn"),
        ("arrow", "warn"),
        ("parquet", "warn"),
        ("object_store", "info"),
        ("tracing", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", filter_str, e))
}

/// Initialize console logging at the given base level.
///
/// Safe to call once per process; a second call fails because the global
/// subscriber is already set.
pub fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    // Route log::* macro calls through tracing before the subscriber exists.
    let _ = tracing_log::LogTracer::init();

    let filter = build_env_filter(level)?;
    let layer = match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer().with_target(true).boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
