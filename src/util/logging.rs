//! Structured logging setup for permscope
//!
//! Diagnostics go to stderr through the `tracing` ecosystem so that stdout
//! carries nothing but rendered listings and reports.
//!
//! # Example
//!
//! ```no_run
//! use permscope::util::logging::{init_logging, parse_level, LoggingConfig};
//!
//! let level = parse_level("debug").unwrap_or(tracing::Level::WARN);
//! init_logging(LoggingConfig {
//!     level,
//!     ..Default::default()
//! });
//!
//! tracing::debug!(path = "/etc/passwd", "resolving mode");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., permscope::fs) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    /// Warnings only, plain text, with targets.
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

/// Parses a log level name, case-insensitively.
///
/// ```
/// use permscope::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Some(Level::DEBUG));
/// assert_eq!(parse_level("INFO"), Some(Level::INFO));
/// assert_eq!(parse_level("invalid"), None);
/// ```
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

fn build_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    if env::var("RUST_LOG").is_ok() {
        return filter;
    }
    match format!("permscope={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initializes the logging system with the provided configuration
///
/// Only the first call has any effect. `RUST_LOG`, when set, replaces the
/// level-derived filter entirely.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("info"), Some(Level::INFO));
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level("error"), Some(Level::ERROR));
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Some(Level::TRACE));
        assert_eq!(parse_level("Debug"), Some(Level::DEBUG));
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }
}
