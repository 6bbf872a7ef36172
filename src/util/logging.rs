//! Structured logging setup for ansigen
//!
//! Initialization and configuration for the `tracing` ecosystem: console
//! output by default, optional JSON for machine consumption, level from flags,
//! `ANSIGEN_LOG_LEVEL` or `RUST_LOG`. Logs go to stderr so stdout stays clean
//! for generated output.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., ansigen::generation) in logs
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Creates a logging configuration with the specified level
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Initializes logging with the given configuration.
///
/// Idempotent: subsequent calls are no-ops. `RUST_LOG` takes precedence over
/// the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            filter = filter
                .add_directive(
                    format!("ansigen={}", config.level)
                        .parse()
                        .expect("static directive"),
                )
                .add_directive("hyper=warn".parse().expect("static directive"))
                .add_directive("reqwest=warn".parse().expect("static directive"));
        }

        let registry = tracing_subscriber::registry().with(filter);

        if config.use_json {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// Initializes logging from `ANSIGEN_LOG_LEVEL`, defaulting to info.
pub fn init_from_env() {
    let level = env::var("ANSIGEN_LOG_LEVEL")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(Level::INFO);
    init_logging(&LoggingConfig::with_level(level));
}

/// Parses a level string, returning None for unknown names.
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_names() {
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("WARN"), Some(Level::WARN));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
    }

    #[test]
    fn test_init_is_idempotent() {
        init_logging(&LoggingConfig::default());
        init_logging(&LoggingConfig::with_level(Level::TRACE));
    }
}
