//! Self-probe used by `s3-event-receiver --healthcheck`.
//!
//! Lets a container HEALTHCHECK hit `/health` without shipping curl or wget
//! in the image.

use std::time::Duration;

use anyhow::Context;

use crate::config::{Config, DEFAULT_PORT};

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Health URL of a receiver listening on loopback at `port`.
pub fn local_url(port: u16) -> String {
    format!("http://127.0.0.1:{port}/health")
}

/// Port the local instance listens on, resolved the same way the server
/// resolves it (config file, then `RECEIVER_PORT`).
///
/// Falls back to [`DEFAULT_PORT`] when the configuration cannot be loaded, so
/// the probe still has somewhere to go.
pub fn local_port() -> u16 {
    port_from(Config::from_env().map(|(config, _)| config))
}

fn port_from(config: anyhow::Result<Config>) -> u16 {
    match config {
        Ok(config) => config.server.port,
        Err(_) => DEFAULT_PORT,
    }
}

/// GET `url` and report whether it answered with a 2xx status.
///
/// Connection failures and timeouts are errors, not `Ok(false)`.
pub async fn probe(url: &str) -> anyhow::Result<bool> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .context("building probe client")?;
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;
    Ok(resp.status().is_success())
}
