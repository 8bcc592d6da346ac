//! Logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level so operators can
/// raise verbosity without touching config files. The `json` format is
/// intended for production log shipping; anything else gets the
/// human-readable pretty format.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.format == "json" {
        builder.json().flatten_event(true).init();
    } else {
        builder.pretty().init();
    }
}
