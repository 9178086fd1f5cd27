//! Logging and tracing initialization.
//!
//! Library crates only emit `tracing` events; installing a subscriber is
//! left to binaries and tests.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the global subscriber from configuration.
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `false` when a
/// global subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(&config.level));

    if config.json {
        registry.with(fmt::layer().json()).try_init().is_ok()
    } else {
        registry
            .with(fmt::layer().with_target(true).compact())
            .try_init()
            .is_ok()
    }
}

/// Logging for the command-line tool: `debug` when verbose, `info` otherwise.
pub fn init_cli_logging(verbose: bool) -> bool {
    let level = if verbose { "debug" } else { "info" };
    init_logging(&LoggingConfig {
        level: level.to_string(),
        json: false,
    })
}

/// Route events through the test harness writer so they show up only for
/// failing tests. Safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::registry()
        .with(env_filter("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
