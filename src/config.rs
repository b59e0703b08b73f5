//! Configuration types for s3-event-receiver.
//!
//! Config is optional: with no file present the receiver runs on built-in
//! defaults. When a file is given it is loaded once at startup and validated
//! before the server opens any ports. Invalid configs are rejected with a
//! clear error rather than silently falling back to defaults.
//!
//! # Example
//! ```toml
//! [server]
//! bind = "0.0.0.0"
//! port = 8000
//!
//! [logging]
//! format = "json"
//!
//! [sink]
//! kind = "stdout"
//! ```

use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "RECEIVER_CONFIG";

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "RECEIVER_PORT";

/// Listen port when neither the config file nor `RECEIVER_PORT` sets one.
pub const DEFAULT_PORT: u16 = 8000;

/// Config file consulted when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/s3-event-receiver/config.toml";

/// Top-level receiver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub sink: SinkConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&content).context("parsing config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the process configuration from the environment.
    ///
    /// Lookup order:
    /// 1. The file named by `RECEIVER_CONFIG` (must exist).
    /// 2. [`DEFAULT_CONFIG_PATH`] if it exists.
    /// 3. Built-in defaults.
    ///
    /// `RECEIVER_PORT` is applied on top of whichever source won.
    pub fn from_env() -> anyhow::Result<(Self, Option<PathBuf>)> {
        let (mut config, source) = match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                (Self::load(&path)?, Some(path))
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    (Self::load(&path)?, Some(path))
                } else {
                    (Self::default(), None)
                }
            }
        };

        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;
        config.validate()?;
        Ok((config, source))
    }

    /// Replace `server.port` with `value` when one is given.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> anyhow::Result<()> {
        if let Some(raw) = value {
            self.server.port = raw
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV}=`{raw}` is not a valid port"))?;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.bind.parse::<IpAddr>().is_ok(),
            "server.bind `{}` is not an IP address",
            self.server.bind
        );
        anyhow::ensure!(
            self.server.max_body_bytes > 0,
            "server.max_body_bytes must be greater than zero"
        );
        anyhow::ensure!(
            self.server.request_timeout_secs > 0,
            "server.request_timeout_secs must be greater than zero"
        );
        Ok(())
    }
}

/// Listener and request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// IP address to bind (default: `0.0.0.0`).
    #[serde(default = "defaults::bind")]
    pub bind: String,

    /// Listen port (default: 8000).
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Largest accepted request body in bytes (default: 2 MiB).
    ///
    /// Larger bodies are rejected with 413 before reaching the handler.
    #[serde(default = "defaults::max_body_bytes")]
    pub max_body_bytes: usize,

    /// Per-request deadline in seconds (default: 30).
    #[serde(default = "defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Socket address to listen on.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .bind
            .parse()
            .with_context(|| format!("server.bind `{}` is not an IP address", self.bind))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::bind(),
            port: defaults::port(),
            max_body_bytes: defaults::max_body_bytes(),
            request_timeout_secs: defaults::request_timeout_secs(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Line format written to stdout.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            format: LogFormat::default(),
        }
    }
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per line, for log shippers.
    Json,
}

/// Where received events are recorded.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub kind: SinkKind,
}

/// Which [`EventSink`](crate::sink::EventSink) implementation to install.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// Emit each event through `tracing` at INFO.
    #[default]
    Tracing,
    /// Print the marker and payload straight to stdout, bypassing the log filter.
    Stdout,
}

impl std::fmt::Display for SinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Tracing => "tracing",
            Self::Stdout => "stdout",
        })
    }
}

mod defaults {
    pub fn bind() -> String { "0.0.0.0".into() }
    pub fn port() -> u16 { super::DEFAULT_PORT }
    pub fn max_body_bytes() -> usize { 2 * 1024 * 1024 }
    pub fn request_timeout_secs() -> u64 { 30 }
    pub fn log_level() -> String { "s3_event_receiver=info,tower_http=warn".into() }
}
