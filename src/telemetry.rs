//! Process-wide tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` overrides `logging.level`.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref(), &logging.level);

    match logging.format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .init(),
    }
}

/// Pick the filter: a non-blank, parseable `rust_log` wins, else `level`.
pub fn env_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn rust_log_takes_precedence_over_configured_level() {
        let filter = env_filter(Some("debug"), "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn configured_level_applies_without_rust_log() {
        let filter = env_filter(None, "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn blank_rust_log_falls_back_to_configured_level() {
        let filter = env_filter(Some("  "), "error");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn default_level_directive_enables_info() {
        let level = crate::config::LoggingConfig::default().level;
        let filter = env_filter(None, &level);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
