use std::sync::Arc;

use anyhow::Context;
use s3_event_receiver::{config::Config, healthcheck, telemetry, AppState};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // When invoked as a Docker HEALTHCHECK, hit /health and exit immediately.
    if std::env::args().nth(1).as_deref() == Some("--healthcheck") {
        return run_healthcheck().await;
    }

    let (config, source) = Config::from_env().context("loading configuration")?;

    telemetry::init_tracing(&config.logging);

    match &source {
        Some(path) => info!(path = %path.display(), "configuration loaded"),
        None => info!("no config file found, using defaults"),
    }

    let addr = config.server.socket_addr()?;
    let state = Arc::new(AppState::from_config(Arc::new(config)));
    info!(
        %addr,
        sink = %state.config.sink.kind,
        max_body_bytes = state.config.server.max_body_bytes,
        "s3-event-receiver starting"
    );

    let app = s3_event_receiver::app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

/// Lightweight healthcheck: GET /health and exit 0 on 2xx, 1 otherwise.
async fn run_healthcheck() -> anyhow::Result<()> {
    let url = healthcheck::local_url(healthcheck::local_port());

    match healthcheck::probe(&url).await {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("healthcheck failed: {e:#}");
            std::process::exit(1);
        }
    }
}
