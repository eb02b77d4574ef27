//! # Cardinality Sentinel
//!
//! Sidecar that keeps a Prometheus server's label cardinality in check.
//! See the `sentinel_runtime` library docs for the pass flow.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cs_01_cardinality_scanner::CardinalityScanner;
use cs_02_config_rewriter::ConfigRewriter;
use cs_03_series_cleaner::SeriesCleaner;
use metrics_source::PrometheusClient;
use sentinel_runtime::status;
use sentinel_runtime::{CliArgs, LoopSettings, RemediationLoop, RuntimeConfig, SummaryStore};
use sentinel_telemetry::{init_telemetry, TelemetryConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("Failed to initialize telemetry")?;

    let config = RuntimeConfig::from_args(args).context("Invalid configuration")?;
    info!(
        prometheus = %config.prometheus_base_url,
        config_path = %config.config_path.display(),
        limit = config.scanner.limit(),
        interval_secs = config.scan_interval.as_secs(),
        "Starting cardinality sentinel"
    );

    let client = Arc::new(
        PrometheusClient::new(&config.prometheus_base_url)
            .context("Failed to build Prometheus client")?,
    );
    client
        .check_ready()
        .await
        .with_context(|| format!("Prometheus at {} is not ready", client.base_url()))?;

    let summary = SummaryStore::new();
    let remediation = Arc::new(RemediationLoop::new(
        Arc::new(CardinalityScanner::new(client.clone(), config.scanner)),
        Arc::new(ConfigRewriter::new(client.clone(), client.clone())),
        Arc::new(SeriesCleaner::new(client.clone(), config.cleaner)),
        summary.clone(),
        LoopSettings {
            config_path: config.config_path.clone(),
            interval: config.scan_interval,
        },
    ));

    let listener = TcpListener::bind(config.status_addr)
        .await
        .with_context(|| format!("Failed to bind status server on {}", config.status_addr))?;

    let shutdown = CancellationToken::new();
    let loop_handle = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { remediation.run(shutdown).await }
    });
    let mut status_handle = tokio::spawn(status::serve(listener, summary, shutdown.clone()));

    info!("Sentinel is running. Press Ctrl+C to stop.");
    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received");
            shutdown.cancel();
            status_handle
                .await
                .context("Status server task panicked")?
                .context("Status server failed")?;
        }
        result = &mut status_handle => {
            shutdown.cancel();
            result
                .context("Status server task panicked")?
                .context("Status server failed")?;
        }
    }

    loop_handle.await.context("Remediation loop panicked")?;
    info!("Sentinel stopped");
    Ok(())
}
