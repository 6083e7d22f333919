//! Serve command handler

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{error, info};

use crate::api;
use crate::config::Config;

pub async fn cmd_serve(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.bind_address, config.server.port);

    let state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 Web Server running at http://{}", addr);
    info!("Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
