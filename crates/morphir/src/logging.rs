//! Structured logging for the Morphir CLI.
//!
//! Console logs go to stderr; stdout is reserved for program output.
//! `MORPHIR_LOG_LEVEL` (trace, debug, info, warn, error) sets the level,
//! `--verbose` forces debug.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the console log level.
pub const LOG_LEVEL_ENV: &str = "MORPHIR_LOG_LEVEL";

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level for console output
    pub console_level: Level,
    /// Emit ANSI colors on stderr
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: Level::INFO,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Defaults overridden by `MORPHIR_LOG_LEVEL`, then by `--verbose`.
    pub fn from_env(verbose: bool) -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            config.console_level = parse_log_level(&level);
        }
        if verbose {
            config.console_level = config.console_level.max(Level::DEBUG);
        }
        config
    }

    /// Filter directives covering the CLI and the IR library.
    pub fn directives(&self) -> String {
        let level = self.console_level.as_str().to_lowercase();
        format!("morphir={level},morphir_ir={level}")
    }
}

/// Parse log level from environment variable or string.
pub fn parse_log_level(s: &str) -> Level {
    match s.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(config: &LogConfig) {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .compact();

    let filter = EnvFilter::new(config.directives());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace"), Level::TRACE);
        assert_eq!(parse_log_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_log_level("info"), Level::INFO);
        assert_eq!(parse_log_level("warn"), Level::WARN);
        assert_eq!(parse_log_level("warning"), Level::WARN);
        assert_eq!(parse_log_level("error"), Level::ERROR);
        assert_eq!(parse_log_level("invalid"), Level::INFO);
    }

    #[test]
    fn test_directives() {
        let config = LogConfig {
            console_level: Level::DEBUG,
            ansi: false,
        };
        assert_eq!(config.directives(), "morphir=debug,morphir_ir=debug");
    }
}
