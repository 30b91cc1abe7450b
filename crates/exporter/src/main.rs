//! SPDK Exporter - Prometheus exporter for SPDK storage metrics
//!
//! Periodically invokes the SPDK RPC tool for per-bdev I/O counters and
//! OCF cache-tier statistics, and serves them as labeled gauges on a
//! `/metrics` endpoint.

use anyhow::Result;
use clap::Parser;
use exporter_lib::{DiagLogger, ExporterMetrics, PollLoop, SpdkRpc, StatSource};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let config = config::ExporterConfig::parse();
    info!(
        port = config.port,
        sleep_secs = config.sleep,
        rpc_path = %config.rpc_path,
        cache_instance = %config.cache_instance,
        "Starting spdk-exporter"
    );

    let diag = DiagLogger::new(config.log, &config.logfile);
    diag.log("### Starting execution of spdk-exporter...");
    diag.log(&format!("Port           : {}", config.port));
    diag.log(&format!("Sleep Time     : {}", config.sleep));
    diag.log(&format!("Log Enabled    : {}", config.log));
    diag.log(&format!("Log Path       : {}", config.logfile));
    diag.log(&format!("RPC Path       : {}", config.rpc_path));
    diag.log(&format!("Cache Instance : {}", config.cache_instance));

    let metrics = Arc::new(ExporterMetrics::new()?);

    let source: Arc<dyn StatSource> = Arc::new(
        SpdkRpc::new(&config.rpc_path, &config.cache_instance)
            .with_timeout(config.rpc_timeout()),
    );

    let poll = PollLoop::new(
        source,
        metrics.clone(),
        diag.clone(),
        config.poll_interval(),
    );
    tokio::spawn(poll.run());

    let state = Arc::new(api::AppState::new(metrics));
    api::serve(config.port, state).await
}
